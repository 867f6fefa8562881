use super::resolve_id;
use anyhow::Result;
use passop_application::CredentialManager;
use passop_core::FormField;

pub fn run(manager: &CredentialManager, reference: &str, field: FormField) -> Result<()> {
    let id = resolve_id(manager.records(), reference);
    manager.copy_field(&id, field)?;
    Ok(())
}
