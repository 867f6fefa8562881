//! Unified path management for passop files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/passop/            # Config directory
//! ├── config.toml              # Application configuration
//! └── logs/                    # Application logs
//!     └── passop.log.YYYY-MM-DD
//!
//! ~/.local/share/passop/       # Data directory
//! └── storage.json             # Key-value store holding the credential list
//! ```
//!
//! When a base directory is given (`--data-dir`), both config and data live
//! directly under it.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "passop";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file location used by passop.
#[derive(Debug, Clone, Default)]
pub struct PassopPaths {
    base: Option<PathBuf>,
}

impl PassopPaths {
    /// Creates a resolver rooted at `base`, or at the platform directories when `None`.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the passop configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/passop/`
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the passop data directory (e.g. `~/.local/share/passop/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the key-value storage file.
    pub fn storage_file(&self, file_name: &str) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(file_name))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
