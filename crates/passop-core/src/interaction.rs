//! User-facing collaborators: notifier, confirmation prompt and clipboard.
//!
//! The store never calls these. The controller in `passop-application`
//! invokes them based on store outcomes; front ends supply the implementations.

use std::fmt;

/// Kind of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        f.write_str(label)
    }
}

/// Surfaces transient messages to the user. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Blocks on a yes/no decision before a destructive action.
pub trait ConfirmPrompt: Send + Sync {
    /// Returns `true` only on an explicit yes.
    fn confirm(&self, message: &str) -> bool;
}

/// Writes text to the system clipboard. Fire-and-forget.
///
/// Implementations log failures instead of returning them.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str);
}

/// Confirm prompt that always answers yes (e.g. `--yes` on the command line).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!("Auto-confirmed: {}", message);
        true
    }
}
