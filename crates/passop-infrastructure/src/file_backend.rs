//! File-backed key-value store.
//!
//! Stores every key in one JSON object file (`{"passwords": "[...]"}`).
//! Values stay opaque strings.

use crate::storage::{AtomicFileError, AtomicJsonFile};
use passop_core::backend::KeyValueBackend;
use passop_core::error::{PassopError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// [`KeyValueBackend`] persisted to a single JSON file.
pub struct FileBackend {
    file: AtomicJsonFile<Entries>,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        tracing::debug!("Using file backend at {}", path.display());
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.file.load().map_err(|e| match e {
            AtomicFileError::ParseError { format, message } => PassopError::Serialization {
                format: format.to_string(),
                message,
            },
            other => PassopError::io(other.to_string()),
        })?;
        Ok(entries.and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // An unreadable file cannot be merged into; it is replaced by this key only.
        let reset = self
            .file
            .update_or_reset(Entries::new(), |entries| {
                entries.insert(key.to_string(), value.to_string());
                Ok(())
            })
            .map_err(|e| {
                PassopError::persistence(format!(
                    "Failed to write {}: {}",
                    self.file.path().display(),
                    e
                ))
            })?;

        if reset {
            tracing::warn!(
                "Storage file {} was corrupt and has been replaced",
                self.file.path().display()
            );
        }
        Ok(())
    }
}
