//! Credential domain models.
//!
//! A [`CredentialDraft`] is what the user is typing; a [`CredentialRecord`] is
//! what ends up in the persisted [`CredentialList`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One of the three inputs of the credential form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Site,
    Username,
    Password,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [FormField; 3] = [FormField::Site, FormField::Username, FormField::Password];

    /// Input name as used in the form and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Site => "site",
            FormField::Username => "username",
            FormField::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "site" | "url" => Ok(FormField::Site),
            "username" | "user" => Ok(FormField::Username),
            "password" | "pass" => Ok(FormField::Password),
            other => Err(format!(
                "unknown field '{}' (expected site, username or password)",
                other
            )),
        }
    }
}

/// A persisted credential entry.
///
/// Field order matches the stored blob: `{site, username, password, id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Website URL or hostname
    pub site: String,
    /// Account name on the site
    pub username: String,
    /// Stored as entered
    pub password: String,
    /// Opaque unique identifier (UUID v4), minted once and never reused
    pub id: String,
}

impl CredentialRecord {
    /// Returns the value of one form field.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Site => &self.site,
            FormField::Username => &self.username,
            FormField::Password => &self.password,
        }
    }

    /// Copies the editable fields back into a draft, dropping the id.
    pub fn to_draft(&self) -> CredentialDraft {
        CredentialDraft {
            site: self.site.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// In-progress form state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDraft {
    pub site: String,
    pub username: String,
    pub password: String,
}

impl CredentialDraft {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the value of one form field.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Site => &self.site,
            FormField::Username => &self.username,
            FormField::Password => &self.password,
        }
    }

    /// Replaces one form field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Site => self.site = value,
            FormField::Username => self.username = value,
            FormField::Password => self.password = value,
        }
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.site.is_empty() && self.username.is_empty() && self.password.is_empty()
    }

    /// Promotes the draft into a record with a freshly minted id.
    pub fn promote(self) -> CredentialRecord {
        self.promote_with_id(Uuid::new_v4().to_string())
    }

    /// Promotes the draft using a caller-supplied id.
    pub fn promote_with_id(self, id: String) -> CredentialRecord {
        CredentialRecord {
            site: self.site,
            username: self.username,
            password: self.password,
            id,
        }
    }
}

/// Ordered sequence of records in insertion order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialList {
    records: Vec<CredentialRecord>,
}

impl CredentialList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CredentialRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// Finds a record by id.
    pub fn get(&self, id: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends a record at the end of the list.
    pub fn push(&mut self, record: CredentialRecord) {
        self.records.push(record);
    }

    /// Returns a copy of the list without the record matching `id`.
    ///
    /// Survivors keep their relative order. An unknown id yields an identical list.
    pub fn without(&self, id: &str) -> CredentialList {
        self.records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect()
    }
}

impl FromIterator<CredentialRecord> for CredentialList {
    fn from_iter<I: IntoIterator<Item = CredentialRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<CredentialRecord>> for CredentialList {
    fn from(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a CredentialList {
    type Item = &'a CredentialRecord;
    type IntoIter = std::slice::Iter<'a, CredentialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for CredentialList {
    type Item = CredentialRecord;
    type IntoIter = std::vec::IntoIter<CredentialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
