//! Draft validation and duplicate detection.
//!
//! Both checks are pure; they never touch the backend.

use super::model::{CredentialDraft, CredentialList};

/// `site` must be longer than this many UTF-16 code units.
pub const MIN_SITE_LEN: usize = 3;
/// `username` must be longer than this many UTF-16 code units.
pub const MIN_USERNAME_LEN: usize = 4;
/// `password` must be longer than this many UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 5;

/// Why a draft was refused by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A field is at or below its minimum length
    Incomplete,
    /// The `(site, username)` pair is already stored
    Duplicate,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Incomplete => "incomplete",
            RejectReason::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(RejectReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Checks the minimum field lengths.
///
/// Lengths are UTF-16 code units, so a character outside the Basic
/// Multilingual Plane (most emoji) counts as two.
pub fn validate(draft: &CredentialDraft) -> ValidationResult {
    let long_enough = utf16_len(&draft.site) > MIN_SITE_LEN
        && utf16_len(&draft.username) > MIN_USERNAME_LEN
        && utf16_len(&draft.password) > MIN_PASSWORD_LEN;

    if long_enough {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(RejectReason::Incomplete)
    }
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// True iff some record has exactly the same `site` and `username` as `draft`.
///
/// Comparison is case-sensitive and passwords are ignored.
pub fn is_duplicate(list: &CredentialList, draft: &CredentialDraft) -> bool {
    list.iter()
        .any(|record| record.site == draft.site && record.username == draft.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::model::CredentialRecord;

    fn stored(site: &str, username: &str) -> CredentialList {
        let record: CredentialRecord =
            CredentialDraft::new(site, username, "whatever").promote_with_id("1".to_string());
        vec![record].into()
    }

    #[test]
    fn test_valid_draft() {
        let draft = CredentialDraft::new("a.com", "alice", "secret1");
        assert_eq!(validate(&draft), ValidationResult::Valid);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Exactly at each threshold is still too short.
        let cases = [
            CredentialDraft::new("abc", "alice", "secret1"),
            CredentialDraft::new("a.com", "abcd", "secret1"),
            CredentialDraft::new("a.com", "alice", "abcde"),
        ];
        for draft in cases {
            assert_eq!(
                validate(&draft),
                ValidationResult::Invalid(RejectReason::Incomplete),
                "{:?} should be incomplete",
                draft
            );
        }
    }

    #[test]
    fn test_one_past_threshold_is_valid() {
        let draft = CredentialDraft::new("abcd", "abcde", "abcdef");
        assert!(validate(&draft).is_valid());
    }

    #[test]
    fn test_empty_draft_is_incomplete() {
        assert!(!validate(&CredentialDraft::default()).is_valid());
    }

    #[test]
    fn test_length_is_not_bytes() {
        // Four 3-byte characters are four code units.
        let draft = CredentialDraft::new("ああああ", "ユーザー", "secret1");
        assert!(!validate(&draft).is_valid());
    }

    #[test]
    fn test_astral_characters_count_twice() {
        // "ab😀" is 3 chars but 4 code units, one past the site threshold.
        let draft = CredentialDraft::new("ab😀", "alice", "secret1");
        assert_eq!(validate(&draft), ValidationResult::Valid);

        // "a😀" is 3 code units: exactly at the threshold.
        let draft = CredentialDraft::new("a😀", "alice", "secret1");
        assert_eq!(
            validate(&draft),
            ValidationResult::Invalid(RejectReason::Incomplete)
        );

        // Three emoji make a 6-unit password.
        let draft = CredentialDraft::new("a.com", "alice", "😀😀😀");
        assert!(validate(&draft).is_valid());
    }

    #[test]
    fn test_duplicate_ignores_password() {
        let list = stored("s.com", "user1");
        let draft = CredentialDraft::new("s.com", "user1", "different-password");
        assert!(is_duplicate(&list, &draft));
    }

    #[test]
    fn test_duplicate_is_case_sensitive() {
        let list = stored("s.com", "user1");
        assert!(!is_duplicate(&list, &CredentialDraft::new("S.com", "user1", "x")));
        assert!(!is_duplicate(&list, &CredentialDraft::new("s.com", "User1", "x")));
    }

    #[test]
    fn test_same_site_other_user_is_not_duplicate() {
        let list = stored("s.com", "user1");
        assert!(!is_duplicate(&list, &CredentialDraft::new("s.com", "user2", "x")));
    }
}
