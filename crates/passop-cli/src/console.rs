//! Terminal implementations of the user-facing collaborators.

use colored::Colorize;
use passop_core::interaction::{Clipboard, ConfirmPrompt, NoticeKind, Notifier};
use rustyline::DefaultEditor;

/// Prints notices in color: green success, red error, cyan info.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => println!("{}", message.green()),
            NoticeKind::Info => println!("{}", message.bright_cyan()),
            NoticeKind::Error => eprintln!("{}", message.red()),
        }
    }
}

/// Asks `[y/N]` on the terminal. Anything but an explicit yes is a no.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl ConfirmPrompt for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::warn!("Cannot open terminal for confirmation: {}", e);
                return false;
            }
        };

        let prompt = format!("{} [y/N] ", message.bright_yellow());
        match rl.readline(&prompt) {
            Ok(answer) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// System clipboard via `arboard`.
///
/// A fresh handle is opened per write. On X11 the contents stay available only
/// while a clipboard manager (or this process) owns them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) {
        let result =
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()));
        if let Err(e) = result {
            tracing::warn!("Clipboard write failed: {}", e);
            eprintln!("{}", format!("Clipboard unavailable: {}", e).yellow());
        }
    }
}
