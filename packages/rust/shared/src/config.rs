//! Application configuration for webaudit.
//!
//! User config lives at `~/.webaudit/webaudit.toml`.
//! Missing file means defaults; the API key itself is never stored in the
//! config, only the name of the environment variable that holds it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WebAuditError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "webaudit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".webaudit";

// ---------------------------------------------------------------------------
// Config structs (matching webaudit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Decoding parameters for the audit call.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// `[gemini]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used for the audit.
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional path to a rubric file overriding the built-in template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_path: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            rubric_path: None,
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_KEY".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}

/// `[generation]` section — low-randomness decoding to keep repeated audits
/// of the same page within the rubric's score tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling threshold.
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling bound.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

fn default_temperature() -> f32 {
    0.1
}
fn default_top_p() -> f32 {
    0.8
}
fn default_top_k() -> u32 {
    40
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.webaudit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WebAuditError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.webaudit/webaudit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WebAuditError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WebAuditError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Resolve the Gemini API key from the configured env var.
pub fn api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.gemini.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(WebAuditError::config(format!(
            "Gemini API key not found. Set the {var_name} environment variable.\n\
             Get a key at https://aistudio.google.com/apikey"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("GEMINI_KEY"));
        assert!(toml_str.contains("gemini-2.5-flash"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.gemini.api_key_env, "GEMINI_KEY");
        assert_eq!(parsed.generation.top_k, 40);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[gemini]
model = "gemini-2.5-pro"
rubric_path = "/tmp/rubric.txt"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.rubric_path.as_deref(), Some("/tmp/rubric.txt"));
        assert_eq!(config.gemini.api_key_env, "GEMINI_KEY");
        assert!((config.generation.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn api_key_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.gemini.api_key_env = "WA_TEST_NONEXISTENT_KEY_12345".into();
        let result = api_key(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key not found"));
    }
}
