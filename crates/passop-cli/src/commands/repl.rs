use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use passop_application::{CredentialManager, DeleteOutcome, messages};
use passop_core::FormField;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::{list, resolve_id};

const COMMANDS: [&str; 11] = [
    "/site",
    "/username",
    "/password",
    "/save",
    "/list",
    "/edit",
    "/delete",
    "/copy",
    "/show",
    "/clear",
    "/help",
];

/// Rustyline helper: completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Set(FormField, String),
    Save,
    List,
    Edit(String),
    Delete(String),
    Copy(String, FormField),
    Show,
    Clear,
    Help,
    Quit,
    Invalid(String),
}

fn parse(line: &str) -> ReplCommand {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return ReplCommand::Quit;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/site" => ReplCommand::Set(FormField::Site, rest.to_string()),
        "/username" => ReplCommand::Set(FormField::Username, rest.to_string()),
        "/password" => ReplCommand::Set(FormField::Password, rest.to_string()),
        "/save" => ReplCommand::Save,
        "/list" => ReplCommand::List,
        "/show" => ReplCommand::Show,
        "/clear" => ReplCommand::Clear,
        "/help" => ReplCommand::Help,
        "/edit" | "/delete" if rest.is_empty() => {
            ReplCommand::Invalid(format!("Usage: {} <id or #>", command))
        }
        "/edit" => ReplCommand::Edit(rest.to_string()),
        "/delete" => ReplCommand::Delete(rest.to_string()),
        "/copy" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next().map(str::parse::<FormField>)) {
                (Some(reference), Some(Ok(field))) => ReplCommand::Copy(reference.to_string(), field),
                (Some(reference), None) => {
                    ReplCommand::Copy(reference.to_string(), FormField::Password)
                }
                (_, Some(Err(e))) => ReplCommand::Invalid(e.to_string()),
                (None, _) => ReplCommand::Invalid(
                    "Usage: /copy <id or #> [site|username|password]".to_string(),
                ),
            }
        }
        _ => ReplCommand::Invalid(format!("Unknown command: {}", command)),
    }
}

fn print_help() {
    let lines = [
        ("/site <value>", "set the site of the draft"),
        ("/username <value>", "set the username of the draft"),
        ("/password <value>", "set the password of the draft"),
        ("/save", "save the draft"),
        ("/list", "list saved passwords"),
        ("/edit <id or #>", "move a saved entry back into the draft"),
        ("/delete <id or #>", "delete a saved entry"),
        ("/copy <id or #> [field]", "copy a field (default: password)"),
        ("/show", "toggle showing the draft password"),
        ("/clear", "clear the draft"),
        ("quit", "leave"),
    ];
    for (usage, text) in lines {
        println!("  {}{}", format!("{:<26}", usage).bright_cyan(), text.bright_black());
    }
}

fn print_draft(manager: &CredentialManager) {
    println!("{}", format_draft(manager).bright_black());
}

fn format_draft(manager: &CredentialManager) -> String {
    let draft = manager.draft();
    let visibility = if manager.is_password_visible() {
        "shown"
    } else {
        "hidden"
    };
    format!(
        "draft: site={:?} username={:?} password={} ({})",
        draft.site,
        draft.username,
        manager.draft_password_display(),
        visibility
    )
}

/// Interactive session over one controller.
pub fn run(manager: &mut CredentialManager, show_passwords: bool) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== PassOP ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        let readline = rl.readline("passop> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                // Lines carrying a password stay out of history.
                if !trimmed.starts_with("/password") {
                    let _ = rl.add_history_entry(trimmed);
                }

                match parse(trimmed) {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    command => dispatch(manager, command, show_passwords),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if !manager.draft().is_empty() {
        tracing::warn!("REPL closed with an unsaved draft");
        eprintln!("{}", "Unsaved draft discarded.".yellow());
    }

    Ok(())
}

/// Errors are already shown by the notifier; the session keeps going.
fn dispatch(manager: &mut CredentialManager, command: ReplCommand, show_passwords: bool) {
    match command {
        ReplCommand::Set(field, value) => {
            manager.set_field(field, value);
            print_draft(manager);
        }
        ReplCommand::Save => {
            if let Err(e) = manager.save_draft() {
                tracing::debug!("Save rejected: {}", e);
            }
        }
        ReplCommand::List => list::print_records(manager.records(), show_passwords),
        ReplCommand::Edit(reference) => {
            let id = resolve_id(manager.records(), &reference);
            match manager.edit(&id) {
                Ok(true) => {
                    println!(
                        "{}",
                        "Entry moved to the draft. Use /save to keep it.".yellow()
                    );
                    print_draft(manager);
                }
                Ok(false) => {}
                Err(e) => tracing::debug!("Edit failed: {}", e),
            }
        }
        ReplCommand::Delete(reference) => {
            let id = resolve_id(manager.records(), &reference);
            match manager.delete(&id) {
                Ok(DeleteOutcome::NotFound) => {
                    eprintln!("{}", messages::NOT_FOUND.red());
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Delete failed: {}", e),
            }
        }
        ReplCommand::Copy(reference, field) => {
            let id = resolve_id(manager.records(), &reference);
            if let Err(e) = manager.copy_field(&id, field) {
                tracing::debug!("Copy failed: {}", e);
            }
        }
        ReplCommand::Show => {
            manager.toggle_password_visibility();
            print_draft(manager);
        }
        ReplCommand::Clear => {
            manager.clear_draft();
            print_draft(manager);
        }
        ReplCommand::Help => print_help(),
        ReplCommand::Invalid(message) => eprintln!("{}", message.red()),
        ReplCommand::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_setters_keep_inner_spaces() {
        assert_eq!(
            parse("/password  correct horse battery "),
            ReplCommand::Set(FormField::Password, "correct horse battery".to_string())
        );
        assert_eq!(
            parse("/site"),
            ReplCommand::Set(FormField::Site, String::new())
        );
    }

    #[test]
    fn test_parse_copy() {
        assert_eq!(
            parse("/copy 2 user"),
            ReplCommand::Copy("2".to_string(), FormField::Username)
        );
        assert_eq!(
            parse("/copy 2"),
            ReplCommand::Copy("2".to_string(), FormField::Password)
        );
        assert!(matches!(parse("/copy 2 email"), ReplCommand::Invalid(_)));
        assert!(matches!(parse("/copy"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_edit_and_delete_need_reference() {
        assert_eq!(parse("/edit 1"), ReplCommand::Edit("1".to_string()));
        assert_eq!(parse("/delete abc"), ReplCommand::Delete("abc".to_string()));
        assert!(matches!(parse("/edit"), ReplCommand::Invalid(_)));
        assert!(matches!(parse("/delete "), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_show_toggles_draft_password() {
        use passop_core::interaction::{AlwaysConfirm, Clipboard, NoticeKind, Notifier};
        use passop_core::{CredentialStore, MemoryBackend};
        use std::sync::Arc;

        struct QuietNotifier;
        impl Notifier for QuietNotifier {
            fn notify(&self, _message: &str, _kind: NoticeKind) {}
        }
        struct NoClipboard;
        impl Clipboard for NoClipboard {
            fn write_text(&self, _text: &str) {}
        }

        let mut manager = CredentialManager::new(
            CredentialStore::open(Arc::new(MemoryBackend::new())),
            Arc::new(QuietNotifier),
            Arc::new(AlwaysConfirm),
            Arc::new(NoClipboard),
        );
        dispatch(
            &mut manager,
            ReplCommand::Set(FormField::Password, "abc".to_string()),
            false,
        );
        assert!(format_draft(&manager).ends_with("password=••• (hidden)"));

        dispatch(&mut manager, ReplCommand::Show, false);
        assert!(format_draft(&manager).ends_with("password=abc (shown)"));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse("quit"), ReplCommand::Quit);
        assert_eq!(parse(" exit "), ReplCommand::Quit);
        assert_eq!(parse("/save"), ReplCommand::Save);
        assert_eq!(parse("/show"), ReplCommand::Show);
        assert!(matches!(parse("/nope"), ReplCommand::Invalid(_)));
        assert!(matches!(parse("hello"), ReplCommand::Invalid(_)));
    }
}
