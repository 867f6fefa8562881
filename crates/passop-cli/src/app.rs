//! Wiring of paths, config, backend and controller.

use crate::console::{ConsoleNotifier, SystemClipboard, TerminalConfirm};
use anyhow::{Result, anyhow};
use passop_application::CredentialManager;
use passop_core::config::AppConfig;
use passop_core::interaction::{AlwaysConfirm, ConfirmPrompt};
use passop_core::CredentialStore;
use passop_infrastructure::{FileBackend, PassopPaths};
use std::sync::Arc;

/// Builds a controller over the file backend described by `config`.
///
/// Deletion prompts are skipped when `assume_yes` is set or the config turns
/// them off.
pub fn build_manager(
    paths: &PassopPaths,
    config: &AppConfig,
    assume_yes: bool,
) -> Result<CredentialManager> {
    let storage_path = paths
        .storage_file(&config.storage.file_name)
        .map_err(|e| anyhow!("Failed to resolve storage path: {}", e))?;
    tracing::info!("[Bootstrap] Storage file: {}", storage_path.display());

    let backend = Arc::new(FileBackend::new(storage_path));
    let store = CredentialStore::open_with_key(backend, config.storage.key.clone());

    let confirm: Arc<dyn ConfirmPrompt> = if assume_yes || !config.ui.confirm_deletes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(TerminalConfirm)
    };

    Ok(CredentialManager::new(
        store,
        Arc::new(ConsoleNotifier),
        confirm,
        Arc::new(SystemClipboard),
    ))
}
