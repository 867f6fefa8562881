//! Key-value backend trait and the in-memory implementation.
//!
//! The credential list is stored as a single JSON blob under one key.

use crate::error::{PassopError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Default key under which the credential list blob is stored.
pub const DEFAULT_STORAGE_KEY: &str = "passwords";

/// A flat, synchronous key-value store of string blobs.
///
/// # Implementation Notes
///
/// - `get` returns `Ok(None)` for a key that was never written.
/// - `set` replaces the whole value; there are no partial updates.
/// - A failed `set` must leave the previous value readable.
pub trait KeyValueBackend: Send + Sync {
    /// Reads the blob stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process backend backed by a shared map.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let backend = Self::new();
        if let Ok(mut entries) = backend.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        backend
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `set` fail until switched off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw view of the stored blob, bypassing error handling.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PassopError::internal(format!("Memory backend lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PassopError::persistence(format!(
                "write to '{}' rejected by memory backend",
                key
            )));
        }

        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PassopError::internal(format!("Memory backend lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("passwords").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let backend = MemoryBackend::new();
        backend.set("passwords", "[]").unwrap();
        assert_eq!(backend.get("passwords").unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        backend.set("k", "v").unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let backend = MemoryBackend::with_entry("k", "old");
        backend.set_fail_writes(true);

        let err = backend.set("k", "new").unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(backend.raw("k").as_deref(), Some("old"));
        assert_eq!(backend.write_count(), 0);
    }
}
