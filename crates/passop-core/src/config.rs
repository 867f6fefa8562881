//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section and
//! field has a default, so a partial file (or no file) is valid.

use crate::backend::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where and under which key the credential list is stored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Key holding the credential list blob
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// File name of the key-value store inside the data directory
    #[serde(default = "default_storage_file")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            file_name: default_storage_file(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_file() -> String {
    "storage.json".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write a daily-rolling log file under the logs directory
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Mask passwords when listing records
    #[serde(default = "default_true")]
    pub mask_passwords: bool,
    /// Ask before deleting a record
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mask_passwords: true,
            confirm_deletes: true,
        }
    }
}

fn default_true() -> bool {
    true
}
