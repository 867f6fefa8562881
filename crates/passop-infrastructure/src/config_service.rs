//! Config file service.
//!
//! Reads and writes `config.toml`. The file is optional; a missing or empty
//! file yields [`AppConfig::default`].

use crate::paths::PassopPaths;
use crate::storage::{AtomicFileError, AtomicTomlFile};
use passop_core::config::AppConfig;
use passop_core::error::{PassopError, Result};
use std::path::{Path, PathBuf};

/// Loads and stores [`AppConfig`] as TOML.
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    /// Creates a service for the config file resolved by `paths`.
    pub fn from_paths(paths: &PassopPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| PassopError::config(format!("Failed to resolve config path: {}", e)))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: Parsed file, or defaults when it is missing or empty
    /// - `Err(PassopError::Config)`: File exists but is not valid TOML for `AppConfig`
    pub fn load(&self) -> Result<AppConfig> {
        match self.file.load() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                tracing::debug!("No config file at {}, using defaults", self.path().display());
                Ok(AppConfig::default())
            }
            Err(AtomicFileError::ParseError { message, .. }) => Err(PassopError::config(
                format!("Invalid config {}: {}", self.path().display(), message),
            )),
            Err(e) => Err(PassopError::io(e.to_string())),
        }
    }

    /// Writes `config` atomically under the file lock.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.save(config).map_err(|e| {
            PassopError::config(format!("Failed to write {}: {}", self.path().display(), e))
        })
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path().exists() {
            return Ok(false);
        }
        self.save(&AppConfig::default())?;
        tracing::info!("Created default config at {}", self.path().display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        let mut config = AppConfig::default();
        config.storage.key = "vault".to_string();
        config.ui.mask_passwords = false;
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn test_save_goes_through_locked_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        service.save(&AppConfig::default()).unwrap();
        service.save(&AppConfig::default()).unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["config.lock", "config.toml"]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(service.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage\nkey = ").unwrap();

        let err = ConfigService::new(path).load().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_ensure_exists_only_once() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("nested").join("config.toml"));

        assert!(service.ensure_exists().unwrap());
        assert!(!service.ensure_exists().unwrap());
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_from_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PassopPaths::new(Some(temp_dir.path()));
        let service = ConfigService::from_paths(&paths).unwrap();
        assert_eq!(service.path(), temp_dir.path().join("config.toml"));
    }
}
