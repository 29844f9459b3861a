//! Configuration loading and credential resolution
//!
//! Settings come from an optional TOML file. The generative-text credential
//! is resolved with ENV → TOML priority and is mandatory: there is no
//! compiled-in fallback key.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable holding the generative-text service credential
pub const API_KEY_ENV_VAR: &str = "AI_API_KEY";

/// Default model used for enrichment text
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default REST base URL of the generative-text service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Logging section of the TOML config
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Service configuration file (`raga-web.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Generative-text service credential (environment takes priority)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier override
    #[serde(default)]
    pub model: Option<String>,

    /// Service base URL override
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `path` if the file exists.
    ///
    /// Returns `Ok(None)` for a missing file; a file that exists but fails
    /// to parse is still an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Model identifier, defaulted
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Base URL, defaulted, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }
}

/// Platform config path: `<config dir>/raga/raga-web.toml`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("raga").join("raga-web.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Resolve the generative-text credential
///
/// **Priority:** ENV → TOML. Absence is a startup error.
pub fn resolve_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml_config.api_key.as_ref().filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "API key found in multiple sources: environment, TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("API key loaded from environment variable");
        return Ok(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("API key loaded from TOML config");
        return Ok(key.trim().to_string());
    }

    Err(Error::Config(format!(
        "Generative-text API key not configured. Configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: api_key = \"your-key\"",
        API_KEY_ENV_VAR
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   \t"));
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TomlConfig::default();
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = TomlConfig {
            base_url: Some("http://localhost:9000/v1/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://localhost:9000/v1");
    }
}
