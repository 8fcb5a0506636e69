//! Configuration loading and validation for Skywarden.
//!
//! Loads settings from `~/.skywarden/config.toml` with environment
//! variable overrides. Every field is defaulted, so a missing file works
//! out of the box.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root settings structure.
///
/// Maps directly to `~/.skywarden/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API key for the reasoning-model host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model to use for every agent call
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Cap on tool-call rounds per conversation
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Region id → snapshot webhook URL
    #[serde(default = "default_regions")]
    pub regions: BTreeMap<String, String>,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_max_rounds() -> u32 {
    8
}
fn default_regions() -> BTreeMap<String, String> {
    let mut regions = BTreeMap::new();
    regions.insert(
        "region1".to_string(),
        "http://localhost:5678/webhook/latest-region1".to_string(),
    );
    regions
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_rounds", &self.max_rounds)
            .field("regions", &self.regions)
            .finish()
    }
}

impl Settings {
    /// Load settings from the default path (~/.skywarden/config.toml).
    ///
    /// Environment overrides, highest priority first:
    /// - `GROQ_API_KEY` / `SKYWARDEN_API_KEY` for the API key
    /// - `SKYWARDEN_MODEL` for the model
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut settings = Self::load_from(&config_path)?;

        if settings.api_key.is_none() {
            settings.api_key = std::env::var("GROQ_API_KEY")
                .ok()
                .or_else(|| std::env::var("SKYWARDEN_API_KEY").ok())
                .filter(|key| !key.is_empty());
        }

        if let Ok(model) = std::env::var("SKYWARDEN_MODEL") {
            settings.model = model;
        }

        Ok(settings)
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// The configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".skywarden")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "max_rounds must be at least 1".into(),
            ));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one region must be configured".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_rounds: default_max_rounds(),
            regions: default_regions(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.max_rounds, 8);
        assert!(settings.regions.contains_key("region1"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "model = \"llama-3.1-8b-instant\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.max_tokens, 1024);
    }

    #[test]
    fn regions_table_parses() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[regions]\nregion1 = \"http://localhost:5678/webhook/latest-region1\"\nregion2 = \"http://localhost:5678/webhook/latest-region2\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.regions.len(), 2);
        assert!(settings.regions["region2"].contains("region2"));
    }

    #[test]
    fn invalid_temperature_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "temperature = 9.5\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "max_rounds = 0\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid toml [[[").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn debug_redacts_api_key() {
        let settings = Settings {
            api_key: Some("gsk-secret".into()),
            ..Settings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("gsk-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
