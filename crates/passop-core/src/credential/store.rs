//! Credential store: the list of records and its synchronization with the backend.
//!
//! Every mutating operation computes the new list, writes the whole list to the
//! backend, and only then replaces the in-memory copy. A failed write therefore
//! leaves memory at the last list that was successfully persisted.

use super::model::{CredentialDraft, CredentialList, CredentialRecord};
use super::validation::{RejectReason, ValidationResult, is_duplicate, validate};
use crate::backend::{DEFAULT_STORAGE_KEY, KeyValueBackend};
use crate::error::{PassopError, Result};
use std::sync::Arc;

/// Outcome of [`CredentialStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was promoted, appended and persisted.
    Saved(CredentialRecord),
    /// The draft was refused; nothing was written.
    Rejected(RejectReason),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Owns the credential list and keeps it mirrored into a [`KeyValueBackend`].
///
/// The store is meant to have a single owner; all mutation goes through
/// [`save`](Self::save), [`remove`](Self::remove) and
/// [`begin_edit`](Self::begin_edit).
pub struct CredentialStore {
    backend: Arc<dyn KeyValueBackend>,
    key: String,
    records: CredentialList,
}

impl CredentialStore {
    /// Opens the store under the default key and loads the current list.
    pub fn open(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::open_with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Opens the store under `key` and loads the current list.
    pub fn open_with_key(backend: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = Self::load(backend.as_ref(), &key);
        tracing::info!("Loaded {} credential(s) from '{}'", records.len(), key);
        Self {
            backend,
            key,
            records,
        }
    }

    /// Reads the list blob from the backend.
    ///
    /// Never fails: a missing blob, a read error, or a blob that is not a valid
    /// list all yield an empty list.
    pub fn load(backend: &dyn KeyValueBackend, key: &str) -> CredentialList {
        let blob = match backend.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return CredentialList::new(),
            Err(e) => {
                tracing::warn!("Failed to read '{}' from backend, starting empty: {}", key, e);
                return CredentialList::new();
            }
        };

        match serde_json::from_str::<CredentialList>(&blob) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Stored '{}' is not a credential list, starting empty: {}", key, e);
                CredentialList::new()
            }
        }
    }

    /// Re-reads the list from the backend, discarding the in-memory copy.
    pub fn reload(&mut self) {
        self.records = Self::load(self.backend.as_ref(), &self.key);
    }

    /// Current list, in insertion order.
    pub fn records(&self) -> &CredentialList {
        &self.records
    }

    /// Storage key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the current in-memory list to the backend.
    pub fn save_all(&self) -> Result<()> {
        self.persist(&self.records)
    }

    /// Validates `draft`, checks for duplicates, then appends and persists.
    ///
    /// # Returns
    ///
    /// - `Ok(SaveOutcome::Saved(record))`: exactly one backend write happened
    /// - `Ok(SaveOutcome::Rejected(_))`: list unchanged, no backend write
    /// - `Err(PassopError::Persistence)`: the write failed, list unchanged
    pub fn save(&mut self, draft: &CredentialDraft) -> Result<SaveOutcome> {
        if let ValidationResult::Invalid(reason) = validate(draft) {
            tracing::debug!("Rejected draft for '{}': {}", draft.site, reason);
            return Ok(SaveOutcome::Rejected(reason));
        }

        if is_duplicate(&self.records, draft) {
            tracing::debug!(
                "Rejected draft for '{}': duplicate username '{}'",
                draft.site,
                draft.username
            );
            return Ok(SaveOutcome::Rejected(RejectReason::Duplicate));
        }

        let record = draft.clone().promote();
        let mut updated = self.records.clone();
        updated.push(record.clone());

        self.commit(updated)?;
        tracing::info!("Saved credential {} for '{}'", record.id, record.site);
        Ok(SaveOutcome::Saved(record))
    }

    /// Removes the record with `id` and persists the shortened list.
    ///
    /// Confirmation is the caller's job. An unknown id is not an error: the
    /// list is left as is and nothing is written.
    ///
    /// # Returns
    ///
    /// The removed record, or `None` when `id` was not found.
    pub fn remove(&mut self, id: &str) -> Result<Option<CredentialRecord>> {
        let Some(record) = self.records.get(id).cloned() else {
            tracing::debug!("Remove ignored, no credential with id {}", id);
            return Ok(None);
        };

        let updated = self.records.without(id);
        self.commit(updated)?;
        tracing::info!("Removed credential {} for '{}'", id, record.site);
        Ok(Some(record))
    }

    /// Takes the record with `id` out of the list and returns its fields as a draft.
    ///
    /// The shortened list is persisted immediately. If the draft is never saved
    /// again the credential is gone for good. An unknown id is a no-op and
    /// returns `None` without writing.
    pub fn begin_edit(&mut self, id: &str) -> Result<Option<CredentialDraft>> {
        let Some(draft) = self.records.get(id).map(CredentialRecord::to_draft) else {
            tracing::debug!("Edit ignored, no credential with id {}", id);
            return Ok(None);
        };

        let updated = self.records.without(id);
        self.commit(updated)?;
        tracing::info!("Credential {} for '{}' moved into the draft", id, draft.site);
        Ok(Some(draft))
    }

    /// Persists `updated` and, only on success, makes it the in-memory list.
    fn commit(&mut self, updated: CredentialList) -> Result<()> {
        self.persist(&updated)?;
        self.records = updated;
        Ok(())
    }

    fn persist(&self, list: &CredentialList) -> Result<()> {
        let blob = serde_json::to_string(list)?;
        self.backend.set(&self.key, &blob).map_err(|e| {
            tracing::error!("Failed to persist {} credential(s): {}", list.len(), e);
            match e {
                PassopError::Persistence(_) => e,
                other => PassopError::persistence(other.to_string()),
            }
        })
    }
}
