//! Shared error model and configuration for webaudit.
//!
//! This crate is the foundation depended on by all other webaudit crates.
//! It provides:
//! - [`WebAuditError`] — the unified error type
//! - Configuration ([`AppConfig`], [`GeminiConfig`], [`GenerationConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GeminiConfig, GenerationConfig, api_key, config_dir, config_file_path, load_config,
    load_config_from,
};
pub use error::{Result, WebAuditError};
