use anyhow::Result;
use passop_application::CredentialManager;
use passop_core::FormField;

pub fn run(
    manager: &mut CredentialManager,
    site: String,
    username: String,
    password: String,
) -> Result<()> {
    manager.set_field(FormField::Site, site);
    manager.set_field(FormField::Username, username);
    manager.set_field(FormField::Password, password);

    let record = manager.save_draft()?;
    tracing::debug!("Saved credential {}", record.id);
    Ok(())
}
