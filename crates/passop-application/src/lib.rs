//! Application layer for PassOP.
//!
//! Coordinates the credential store with the user-facing collaborators
//! (notifier, confirm prompt, clipboard).

pub mod credential_manager;


pub use credential_manager::{CredentialManager, DeleteOutcome, mask, messages};
