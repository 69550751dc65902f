//! Configuration management for the catalog client.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Remote catalog settings
    pub catalog: CatalogConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Append the safe-content flag to list requests
    #[serde(default = "default_sfw")]
    pub sfw: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bundled snapshot directory (relative to data directory or absolute)
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Keep fetched pages and entries in memory
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_sfw() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("webhon-catalog/{}", env!("CARGO_PKG_VERSION"))
}

fn default_snapshot_dir() -> String {
    "snapshots".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            sfw: default_sfw(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
            snapshot_dir: default_snapshot_dir(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl CatalogConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Check values that would make every request fail
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.catalog.base_url;
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            bail!("catalog.base_url must be an absolute http(s) URL, got {:?}", base_url);
        }

        if self.catalog.timeout_seconds == 0 {
            bail!("catalog.timeout_seconds must be greater than zero");
        }

        Ok(())
    }

    /// Get the absolute path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the absolute path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.log_dir)
    }

    /// Get the absolute path for the snapshot directory
    pub fn snapshot_dir(&self) -> PathBuf {
        self.resolve(&self.catalog.snapshot_dir)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.root_dir, "data");
        assert_eq!(config.catalog.base_url, "https://api.jikan.moe/v4");
        assert!(config.catalog.sfw);
        assert_eq!(config.catalog.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let original_config = Config::default();
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.data.root_dir, original_config.data.root_dir);
        assert_eq!(
            loaded_config.catalog.base_url,
            original_config.catalog.base_url
        );

        Ok(())
    }

    #[test]
    fn test_partial_catalog_section_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[data]
root_dir = "/srv/webhon"

[logging]
log_dir = "logs"
default_level = "debug"
console = true
file = false
json_format = false

[catalog]
base_url = "http://localhost:8080/v4"
"#,
        )?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.catalog.base_url, "http://localhost:8080/v4");
        assert_eq!(config.catalog.timeout_seconds, 5);
        assert!(config.catalog.cache_enabled);
        assert_eq!(config.snapshot_dir(), PathBuf::from("/srv/webhon/snapshots"));

        Ok(())
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.catalog.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catalog.base_url = "api.jikan.moe/v4".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        // Should return default config without error
        assert_eq!(config.data.root_dir, "data");
    }

    #[test]
    fn test_path_resolution() {
        let config = Config::default();

        let log_dir = config.log_dir();
        assert!(log_dir.ends_with("data/logs"));

        let snapshot_dir = config.snapshot_dir();
        assert!(snapshot_dir.ends_with("data/snapshots"));
    }
}
