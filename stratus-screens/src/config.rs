//! Application configuration
//!
//! Small TOML file under the user config directory controlling the
//! screen defaults. Missing files are created with defaults; unknown
//! or absent fields fall back via serde defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stratus_gateway::MAX_COMPLETED_TRANSFERS;

/// Screen configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Completed-transfers screen
    #[serde(default)]
    pub transfers: TransfersConfig,

    /// Verification screen
    #[serde(default)]
    pub verification: VerificationConfig,
}

/// Completed-transfers settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransfersConfig {
    /// Retention bound for the completed list
    #[serde(default = "default_max_completed")]
    pub max_completed: usize,

    /// Override for the transfers database location
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for TransfersConfig {
    fn default() -> Self {
        Self {
            max_completed: default_max_completed(),
            database_path: None,
        }
    }
}

/// Verification settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VerificationConfig {
    /// Region key overriding device inference, e.g. `"US"`
    #[serde(default)]
    pub default_region: Option<String>,
}

fn default_max_completed() -> usize {
    MAX_COMPLETED_TRANSFERS
}

impl AppConfig {
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("stratus")
            .join("screens.toml")
    }

    /// Load configuration from the default path, creating it if absent
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_config_path())
    }

    /// Load configuration from an explicit path, creating it if absent
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            let config: AppConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }
}
