use passop_core::error::{PassopError, Result};
use passop_core::interaction::{Clipboard, ConfirmPrompt, NoticeKind, Notifier};
use passop_core::{
    CredentialDraft, CredentialList, CredentialRecord, CredentialStore, FormField, RejectReason,
    SaveOutcome,
};
use std::sync::Arc;

/// User-visible message texts.
pub mod messages {
    pub const SAVED: &str = "Password saved!";
    pub const INCOMPLETE: &str = "Error: Please fill in all fields correctly!";
    pub const DUPLICATE: &str = "Error: This password already exists!";
    pub const DELETED: &str = "Password deleted!";
    pub const CONFIRM_DELETE: &str = "Do you really want to delete this password?";
    pub const COPIED: &str = "Copied to clipboard!";
    pub const NOT_FOUND: &str = "Error: No password with that id!";
    pub const EDIT_MISSING: &str = "That password no longer exists.";
    pub const STORAGE_FAILED: &str = "Error: Could not write passwords to storage!";
}

/// Result of [`CredentialManager::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(CredentialRecord),
    /// The user answered no; nothing changed.
    Declined,
    /// No record with that id; nothing changed.
    NotFound,
}

/// The single controller over the credential store and the form draft.
///
/// `CredentialManager` is responsible for:
/// - Holding the draft the user is composing
/// - Driving save / delete / edit through the store
/// - Turning outcomes into notifier messages
/// - Asking for confirmation before deleting
/// - Copying fields to the clipboard
///
/// Errors are reported to the notifier and also returned, but the manager stays
/// usable after any of them.
pub struct CredentialManager {
    store: CredentialStore,
    draft: CredentialDraft,
    password_visible: bool,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    clipboard: Arc<dyn Clipboard>,
}

impl CredentialManager {
    pub fn new(
        store: CredentialStore,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn ConfirmPrompt>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            store,
            draft: CredentialDraft::default(),
            password_visible: false,
            notifier,
            confirm,
            clipboard,
        }
    }

    // ============================================================================
    // Read-only views
    // ============================================================================

    pub fn records(&self) -> &CredentialList {
        self.store.records()
    }

    pub fn draft(&self) -> &CredentialDraft {
        &self.draft
    }

    pub fn is_password_visible(&self) -> bool {
        self.password_visible
    }

    /// Draft password as it should be shown, honoring the visibility toggle.
    pub fn draft_password_display(&self) -> String {
        if self.password_visible {
            self.draft.password.clone()
        } else {
            mask(&self.draft.password)
        }
    }

    // ============================================================================
    // Draft editing
    // ============================================================================

    /// Replaces one draft field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn clear_draft(&mut self) {
        self.draft = CredentialDraft::default();
    }

    /// Flips whether the draft password is shown in clear text.
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Saves the current draft.
    ///
    /// On success the draft is cleared. On any failure the draft is kept so the
    /// user can fix it.
    ///
    /// # Errors
    ///
    /// - `PassopError::Validation`: a field is too short
    /// - `PassopError::Duplicate`: same site and username already stored
    /// - `PassopError::Persistence`: backend write failed
    pub fn save_draft(&mut self) -> Result<CredentialRecord> {
        match self.store.save(&self.draft) {
            Ok(SaveOutcome::Saved(record)) => {
                self.clear_draft();
                self.notifier.notify(messages::SAVED, NoticeKind::Success);
                Ok(record)
            }
            Ok(SaveOutcome::Rejected(RejectReason::Incomplete)) => {
                self.notifier.notify(messages::INCOMPLETE, NoticeKind::Error);
                Err(PassopError::incomplete())
            }
            Ok(SaveOutcome::Rejected(RejectReason::Duplicate)) => {
                self.notifier.notify(messages::DUPLICATE, NoticeKind::Error);
                Err(PassopError::duplicate(
                    self.draft.site.clone(),
                    self.draft.username.clone(),
                ))
            }
            Err(e) => Err(self.report_storage_failure(e)),
        }
    }

    /// Deletes a record after the user confirms.
    ///
    /// An unknown id is reported as [`DeleteOutcome::NotFound`] without prompting.
    pub fn delete(&mut self, id: &str) -> Result<DeleteOutcome> {
        if !self.store.records().contains_id(id) {
            tracing::debug!("Delete requested for unknown credential {}", id);
            return Ok(DeleteOutcome::NotFound);
        }

        if !self.confirm.confirm(messages::CONFIRM_DELETE) {
            tracing::debug!("Delete of {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        match self.store.remove(id) {
            Ok(Some(record)) => {
                self.notifier.notify(messages::DELETED, NoticeKind::Success);
                Ok(DeleteOutcome::Deleted(record))
            }
            Ok(None) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(self.report_storage_failure(e)),
        }
    }

    /// Moves a record into the draft for re-editing.
    ///
    /// The record is removed from storage right away; it only comes back if the
    /// draft is saved again. Returns `false` (draft untouched) for an unknown id.
    pub fn edit(&mut self, id: &str) -> Result<bool> {
        match self.store.begin_edit(id) {
            Ok(Some(draft)) => {
                self.draft = draft;
                Ok(true)
            }
            Ok(None) => {
                self.notifier.notify(messages::EDIT_MISSING, NoticeKind::Info);
                Ok(false)
            }
            Err(e) => Err(self.report_storage_failure(e)),
        }
    }

    /// Copies arbitrary text to the clipboard.
    pub fn copy_text(&self, text: &str) {
        self.clipboard.write_text(text);
        self.notifier.notify(messages::COPIED, NoticeKind::Info);
    }

    /// Copies one field of a stored record to the clipboard.
    pub fn copy_field(&self, id: &str, field: FormField) -> Result<()> {
        let Some(record) = self.store.records().get(id) else {
            self.notifier.notify(messages::NOT_FOUND, NoticeKind::Error);
            return Err(PassopError::not_found("credential", id));
        };
        self.copy_text(record.field(field));
        Ok(())
    }

    fn report_storage_failure(&self, error: PassopError) -> PassopError {
        tracing::error!("Credential storage failed: {}", error);
        self.notifier
            .notify(messages::STORAGE_FAILED, NoticeKind::Error);
        error
    }
}

/// Replaces every character of `secret` with a bullet.
pub fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
