//! Atomic file operations for serde data.
//!
//! Provides a thin layer for safe access to data files from more than one
//! passop process. The on-disk format is picked by a [`FileFormat`] marker, so
//! the JSON storage file and the TOML config file share one write path.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// The file exists but its content could not be decoded.
    ParseError {
        format: &'static str,
        message: String,
    },
    /// The value could not be encoded.
    SerializeError {
        format: &'static str,
        message: String,
    },
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::ParseError { format, message } => {
                write!(f, "{} parse error: {}", format, message)
            }
            AtomicFileError::SerializeError { format, message } => {
                write!(f, "{} serialization error: {}", format, message)
            }
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

/// Text encoding of an [`AtomicFile`].
pub trait FileFormat {
    const NAME: &'static str;

    fn encode<T: Serialize>(value: &T) -> Result<String, String>;

    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, String>;
}

/// Pretty-printed JSON.
pub struct Json;

impl FileFormat for Json {
    const NAME: &'static str = "JSON";

    fn encode<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string_pretty(value).map_err(|e| e.to_string())
    }

    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}

/// Pretty-printed TOML.
pub struct Toml;

impl FileFormat for Toml {
    const NAME: &'static str = "TOML";

    fn encode<T: Serialize>(value: &T) -> Result<String, String> {
        toml::to_string_pretty(value).map_err(|e| e.to_string())
    }

    fn decode<T: DeserializeOwned>(content: &str) -> Result<T, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

pub type AtomicJsonFile<T> = AtomicFile<T, Json>;
pub type AtomicTomlFile<T> = AtomicFile<T, Toml>;

/// A handle to a data file that is only ever replaced whole.
///
/// Provides:
/// - **Atomicity**: Each write goes to its own temp file that is renamed over the target
/// - **Isolation**: Writers hold an exclusive lock on a sibling `.lock` file
/// - **Durability**: Explicit fsync before rename
/// - **Privacy**: On Unix the file is created with mode 600
pub struct AtomicFile<T, F> {
    path: PathBuf,
    _phantom: PhantomData<(T, F)>,
}

impl<T, F> AtomicFile<T, F>
where
    T: Serialize + DeserializeOwned,
    F: FileFormat,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        F::decode(&content)
            .map(Some)
            .map_err(|message| AtomicFileError::ParseError {
                format: F::NAME,
                message,
            })
    }

    /// Replaces the file with `data` under the lock.
    pub fn save(&self, data: &T) -> Result<(), AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write(data)
    }

    /// Performs a locked read-modify-write.
    ///
    /// `default_value` is used when the file does not exist yet. If `f` returns
    /// an error nothing is written.
    pub fn update<U>(&self, default_value: T, f: U) -> Result<(), AtomicFileError>
    where
        U: FnOnce(&mut T) -> Result<(), AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.write(&data)
    }

    /// Like [`update`](Self::update), but an undecodable file is treated as
    /// missing and overwritten.
    ///
    /// Returns `true` when an undecodable file was discarded.
    pub fn update_or_reset<U>(&self, default_value: T, f: U) -> Result<bool, AtomicFileError>
    where
        U: FnOnce(&mut T) -> Result<(), AtomicFileError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let (mut data, reset) = match self.load() {
            Ok(data) => (data.unwrap_or(default_value), false),
            Err(AtomicFileError::ParseError { .. }) => (default_value, true),
            Err(e) => return Err(e),
        };
        f(&mut data)?;
        self.write(&data)?;

        Ok(reset)
    }

    /// Writes without taking the lock; callers hold it.
    fn write(&self, data: &T) -> Result<(), AtomicFileError> {
        let parent = self.parent_dir()?;
        if !parent.exists() {
            fs::create_dir_all(&parent)?;
        }

        let content = F::encode(data).map_err(|message| AtomicFileError::SerializeError {
            format: F::NAME,
            message,
        })?;

        // NamedTempFile is created with mode 600 on Unix and a unique name.
        let mut tmp_file = NamedTempFile::new_in(&parent)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }

    fn parent_dir(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        if parent.as_os_str().is_empty() {
            Ok(PathBuf::from("."))
        } else {
            Ok(parent.to_path_buf())
        }
    }
}

/// Exclusive lock on `<file>.lock`, released when dropped.
///
/// The lock file itself is left in place. Removing it would let a newcomer
/// lock a fresh inode while others still wait on the old one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        use fs2::FileExt;
        let _ = self.file.unlock();
    }
}
