//! TOML-based application configuration.
//!
//! Stores the resolution-service credential and model selection.
//! Configuration is stored at `~/.config/timeblock/config.toml` and is
//! constructed once at startup, then passed by reference into the
//! pipeline; there is no ambient global.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Resolution-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Service credential. Empty means unauthenticated.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Model asked for the duration of an expression.
    #[serde(default = "default_duration_model")]
    pub duration_model: String,
    /// Model asked for the absolute datetime.
    #[serde(default = "default_datetime_model")]
    pub datetime_model: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeblock/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
}

// Default functions
fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_duration_model() -> String {
    "gpt-3.5-turbo-1106".to_string()
}
fn default_datetime_model() -> String {
    "gpt-4-1106-preview".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            duration_model: default_duration_model(),
            datetime_model: default_datetime_model(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults back on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "llm.api_key" => Some(self.llm.api_key.clone()),
            "llm.api_base" => Some(self.llm.api_base.clone()),
            "llm.duration_model" => Some(self.llm.duration_model.clone()),
            "llm.datetime_model" => Some(self.llm.datetime_model.clone()),
            _ => None,
        }
    }

    /// Set a config value by dotted key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown key or if saving fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "llm.api_key" => self.llm.api_key = value.to_string(),
            "llm.api_base" => self.llm.api_base = value.to_string(),
            "llm.duration_model" => self.llm.duration_model = value.to_string(),
            "llm.datetime_model" => self.llm.datetime_model = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.api_key, "");
        assert_eq!(config.llm.api_base, "https://api.openai.com/v1");
        assert_eq!(config.llm.duration_model, "gpt-3.5-turbo-1106");
        assert_eq!(config.llm.datetime_model, "gpt-4-1106-preview");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.llm.api_key, "sk-test");
        assert_eq!(parsed.llm.api_base, config.llm.api_base);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[llm]\napi_key = \"sk-test\"\n").unwrap();
        assert_eq!(parsed.llm.api_key, "sk-test");
        assert_eq!(parsed.llm.duration_model, "gpt-3.5-turbo-1106");
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = Config::default();
        assert_eq!(
            config.get("llm.duration_model").as_deref(),
            Some("gpt-3.5-turbo-1106")
        );
        assert_eq!(config.get("llm.nope"), None);
    }

    #[test]
    fn test_set_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("TIMEBLOCK_CONFIG_DIR", dir.path());

        let mut config = Config::default();
        config.set("llm.api_key", "sk-disk").unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.llm.api_key, "sk-disk");

        let err = config.set("llm.nope", "x").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));

        std::env::remove_var("TIMEBLOCK_CONFIG_DIR");
    }
}
