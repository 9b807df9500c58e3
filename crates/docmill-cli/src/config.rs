//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to the SQLite database. Defaults to `~/.docmill/docmill.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Delegated (AI) segmentation settings
    #[serde(default)]
    pub ai: AiSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Settings for the delegated segmentation path.
///
/// The API key never leaves this machine except in requests to the
/// configured endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AiSettings {
    /// Whether delegated segmentation is attempted.
    #[serde(default)]
    pub enabled: bool,

    /// Chat-completions API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token for the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Per-call timeout in seconds.
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docmill").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the database path, defaulting next to the config file.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docmill").join("docmill.db"))
    }

    /// The AI endpoint, key, and model when delegated segmentation is fully
    /// configured.
    pub fn ai_credentials(&self) -> Option<(&str, &str, &str)> {
        if !self.ai.enabled {
            return None;
        }
        match (&self.ai.endpoint, &self.ai.api_key, &self.ai.model) {
            (Some(endpoint), Some(key), Some(model)) => {
                Some((endpoint.as_str(), key.as_str(), model.as_str()))
            }
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_ai_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert!(!config.ai.enabled);
        assert!(config.ai_credentials().is_none());
    }

    #[test]
    fn test_ai_credentials_require_all_fields() {
        let mut config = Config::default();
        config.ai.enabled = true;
        config.ai.endpoint = Some("https://api.openai.com".to_string());
        assert!(config.ai_credentials().is_none());

        config.ai.api_key = Some("sk-test".to_string());
        config.ai.model = Some("gpt-4o-mini".to_string());
        let (endpoint, key, model) = config.ai_credentials().unwrap();
        assert_eq!(endpoint, "https://api.openai.com");
        assert_eq!(key, "sk-test");
        assert_eq!(model, "gpt-4o-mini");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            color = false

            [ai]
            enabled = true
            "#,
        )
        .unwrap();
        assert!(!config.settings.color);
        assert!(config.ai.enabled);
        assert_eq!(config.ai.timeout_secs, 30);
    }
}
