//! Configuration for rso-status.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::RsoResult;

/// Main configuration for rso-status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Activation thresholds.
    #[serde(default)]
    pub eligibility: EligibilityConfig,

    /// Status cache storage.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Activation thresholds for an RSO.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EligibilityConfig {
    /// Minimum number of members.
    #[serde(default = "default_min_members")]
    pub min_members: usize,

    /// Minimum number of members sharing one email domain.
    #[serde(default = "default_min_same_domain")]
    pub min_same_domain: usize,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_members: default_min_members(),
            min_same_domain: default_min_same_domain(),
        }
    }
}

fn default_min_members() -> usize {
    5
}

fn default_min_same_domain() -> usize {
    4
}

/// Status cache storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the storage files.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Storage key of the status table.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("rso-status"))
        .unwrap_or_else(|| PathBuf::from(".rso-status"))
}

fn default_storage_key() -> String {
    "rsoStatuses".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> RsoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RsoResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            eligibility: EligibilityConfig::default(),
            storage: StorageConfig::default(),
        }
    }

    /// Rejects settings the cache cannot work with.
    pub fn validate(&self) -> RsoResult<()> {
        let key = self.storage.key.trim();
        if key.is_empty() {
            return Err(crate::RsoError::config("storage.key must not be empty"));
        }
        if key.contains(&['/', '\\'][..]) || key == "." || key == ".." {
            return Err(crate::RsoError::config(format!(
                "storage.key '{}' must be a plain name",
                self.storage.key
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
