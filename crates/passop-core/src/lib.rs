pub mod backend;
pub mod config;
pub mod credential;
pub mod error;
pub mod interaction;

// Re-export common error type
pub use error::{PassopError, Result};

pub use backend::{KeyValueBackend, MemoryBackend};
pub use credential::{
    CredentialDraft, CredentialList, CredentialRecord, CredentialStore, FormField, RejectReason,
    SaveOutcome,
};
pub use interaction::{AlwaysConfirm, Clipboard, ConfirmPrompt, NoticeKind, Notifier};
