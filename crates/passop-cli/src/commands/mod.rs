pub mod add;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod list;
pub mod repl;

use passop_core::CredentialList;

/// Accepts either a record id or a 1-based position as printed by `list`.
pub fn resolve_id(records: &CredentialList, reference: &str) -> String {
    let reference = reference.trim().trim_start_matches('#');
    if records.contains_id(reference) {
        return reference.to_string();
    }

    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| records.as_slice().get(index))
        .map(|record| record.id.clone())
        .unwrap_or_else(|| reference.to_string())
}
