//! Credential domain module.
//!
//! # Module Structure
//!
//! - `model`: record, draft and list types
//! - `validation`: minimum-length rules and duplicate detection
//! - `store`: the list owner that keeps memory and backend in sync

mod model;
mod store;
mod validation;

pub use model::{CredentialDraft, CredentialList, CredentialRecord, FormField};
pub use store::{CredentialStore, SaveOutcome};
pub use validation::{
    MIN_PASSWORD_LEN, MIN_SITE_LEN, MIN_USERNAME_LEN, RejectReason, ValidationResult,
    is_duplicate, validate,
};
