use super::resolve_id;
use anyhow::Result;
use colored::Colorize;
use passop_application::{CredentialManager, DeleteOutcome, messages};
use passop_core::PassopError;

pub fn run(manager: &mut CredentialManager, reference: &str) -> Result<()> {
    let id = resolve_id(manager.records(), reference);
    match manager.delete(&id)? {
        DeleteOutcome::Deleted(record) => {
            tracing::debug!("Deleted credential {}", record.id);
            Ok(())
        }
        DeleteOutcome::Declined => Ok(()),
        DeleteOutcome::NotFound => {
            eprintln!("{}", messages::NOT_FOUND.red());
            Err(PassopError::not_found("credential", id).into())
        }
    }
}
