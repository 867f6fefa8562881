use super::resolve_id;
use anyhow::Result;
use colored::Colorize;
use passop_application::CredentialManager;
use passop_core::{FormField, PassopError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Source of edited field values, prefilled with the current value.
trait FieldReader {
    fn read_field(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String>;
}

impl FieldReader for DefaultEditor {
    fn read_field(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String> {
        self.readline_with_initial(prompt, (initial, ""))
    }
}

/// Loads a record into the draft and prompts for each field, prefilled.
///
/// The record leaves storage as soon as editing starts. Any exit other than a
/// successful save drops it for good, so the user is told before and after.
pub fn run(manager: &mut CredentialManager, reference: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let id = resolve_id(manager.records(), reference);
    if !manager.edit(&id)? {
        return Err(PassopError::not_found("credential", id).into());
    }

    println!(
        "{}",
        "Editing. The entry is saved again only when you finish (Ctrl-C discards it).".bright_black()
    );

    match refill_and_save(&mut rl, manager) {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn_abandoned(&id);
            Ok(())
        }
        Err(e) => {
            warn_abandoned(&id);
            Err(e)
        }
    }
}

fn warn_abandoned(id: &str) {
    tracing::warn!("Edit of {} abandoned; record dropped", id);
    eprintln!(
        "{}",
        "Edit abandoned. The entry was removed and not saved.".yellow()
    );
}

/// Prompts until the draft saves. Returns `false` when the user interrupts.
///
/// Rejected drafts (too short, duplicate) are prompted again with what the
/// user typed.
fn refill_and_save<R: FieldReader>(reader: &mut R, manager: &mut CredentialManager) -> Result<bool> {
    loop {
        match prompt_fields(reader, manager) {
            Ok(()) => {}
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        match manager.save_draft() {
            Ok(_) => return Ok(true),
            Err(PassopError::Validation { .. }) | Err(PassopError::Duplicate { .. }) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_fields<R: FieldReader>(
    reader: &mut R,
    manager: &mut CredentialManager,
) -> rustyline::Result<()> {
    for field in FormField::ALL {
        let current = manager.draft().field(field).to_string();
        let prompt = format!("{}: ", field.as_str());
        let value = reader.read_field(&prompt, &current)?;
        manager.set_field(field, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use passop_core::interaction::{AlwaysConfirm, Clipboard, NoticeKind, Notifier};
    use passop_core::{CredentialDraft, CredentialStore, MemoryBackend};
    use std::collections::VecDeque;
    use std::sync::Arc;

    struct QuietNotifier;

    impl Notifier for QuietNotifier {
        fn notify(&self, _message: &str, _kind: NoticeKind) {}
    }

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn write_text(&self, _text: &str) {}
    }

    enum Answer {
        Keep,
        Type(&'static str),
        Interrupt,
    }

    struct ScriptedReader {
        answers: VecDeque<Answer>,
    }

    impl ScriptedReader {
        fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
            }
        }
    }

    impl FieldReader for ScriptedReader {
        fn read_field(&mut self, _prompt: &str, initial: &str) -> rustyline::Result<String> {
            match self.answers.pop_front() {
                Some(Answer::Keep) => Ok(initial.to_string()),
                Some(Answer::Type(value)) => Ok(value.to_string()),
                Some(Answer::Interrupt) | None => Err(ReadlineError::Interrupted),
            }
        }
    }

    fn manager_with(draft: CredentialDraft) -> (CredentialManager, String) {
        let backend = MemoryBackend::new();
        let mut store = CredentialStore::open(Arc::new(backend));
        let id = match store.save(&draft).unwrap() {
            passop_core::SaveOutcome::Saved(record) => record.id,
            other => panic!("expected Saved, got {:?}", other),
        };
        let manager = CredentialManager::new(
            store,
            Arc::new(QuietNotifier),
            Arc::new(AlwaysConfirm),
            Arc::new(NoClipboard),
        );
        (manager, id)
    }

    #[test]
    fn test_accepting_prefilled_values_keeps_them_byte_for_byte() {
        let (mut manager, id) =
            manager_with(CredentialDraft::new(" a.com", "alice ", "secret1 "));
        assert!(manager.edit(&id).unwrap());

        let mut reader = ScriptedReader::new(vec![Answer::Keep, Answer::Keep, Answer::Keep]);
        assert!(refill_and_save(&mut reader, &mut manager).unwrap());

        let records = manager.records();
        assert_eq!(records.len(), 1);
        let record = records.iter().next().unwrap();
        assert_eq!(record.site, " a.com");
        assert_eq!(record.username, "alice ");
        assert_eq!(record.password, "secret1 ");
    }

    #[test]
    fn test_changed_field_is_saved() {
        let (mut manager, id) = manager_with(CredentialDraft::new("a.com", "alice", "secret1"));
        manager.edit(&id).unwrap();

        let mut reader =
            ScriptedReader::new(vec![Answer::Keep, Answer::Keep, Answer::Type("new-secret")]);
        assert!(refill_and_save(&mut reader, &mut manager).unwrap());

        let record = manager.records().iter().next().unwrap();
        assert_eq!(record.password, "new-secret");
        assert_ne!(record.id, id);
    }

    #[test]
    fn test_rejected_draft_is_prompted_again() {
        let (mut manager, id) = manager_with(CredentialDraft::new("a.com", "alice", "secret1"));
        manager.edit(&id).unwrap();

        let mut reader = ScriptedReader::new(vec![
            Answer::Keep,
            Answer::Keep,
            Answer::Type("abc"),
            Answer::Keep,
            Answer::Keep,
            Answer::Type("longer-secret"),
        ]);
        assert!(refill_and_save(&mut reader, &mut manager).unwrap());
        assert_eq!(
            manager.records().iter().next().unwrap().password,
            "longer-secret"
        );
    }

    #[test]
    fn test_interrupt_leaves_record_removed() {
        let (mut manager, id) = manager_with(CredentialDraft::new("a.com", "alice", "secret1"));
        manager.edit(&id).unwrap();

        let mut reader = ScriptedReader::new(vec![Answer::Keep, Answer::Interrupt]);
        assert!(!refill_and_save(&mut reader, &mut manager).unwrap());
        assert!(manager.records().is_empty());
    }
}
