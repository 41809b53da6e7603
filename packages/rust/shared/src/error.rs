//! Error types for webaudit.
//!
//! Library crates use [`WebAuditError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all webaudit operations.
#[derive(Debug, thiserror::Error)]
pub enum WebAuditError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP transport error during the page fetch.
    #[error("network error: {0}")]
    Network(String),

    /// HTML parsing or serialization error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Remote model error (API, auth, quota, or response shape).
    #[error("model error: {0}")]
    Model(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WebAuditError>;

impl WebAuditError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = WebAuditError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = WebAuditError::Model("HTTP 429: quota exceeded".into());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
