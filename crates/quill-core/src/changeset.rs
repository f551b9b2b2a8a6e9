//! Changesets - validated, diff-style descriptions of a pending write.
//!
//! A changeset is built without touching the store, so callers can inspect
//! the errors (or the effective diff) before deciding to persist.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Field name to error messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.0.iter().map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// Flatten into `"field message"` strings.
    pub fn messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field} {m}")))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}

/// Whether a changeset targets a new row or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Insert,
    Update,
}

/// A pending change to an entity.
///
/// `A` is the attribute diff (only fields that differ from the base entity),
/// `F` is the merged, validated field set. `fields` is present exactly when
/// `errors` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct Changeset<A, F> {
    action: Action,
    valid: bool,
    changes: A,
    #[serde(skip)]
    fields: Option<F>,
    errors: FieldErrors,
}

impl<A, F> Changeset<A, F> {
    pub(crate) fn new(action: Action, changes: A, fields: F, errors: FieldErrors) -> Self {
        let valid = errors.is_empty();
        Self {
            action,
            valid,
            fields: valid.then_some(fields),
            changes,
            errors,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn changes(&self) -> &A {
        &self.changes
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The merged field set, or the errors that prevent it.
    pub fn into_fields(self) -> Result<F, FieldErrors> {
        self.fields.ok_or(self.errors)
    }

    /// The attribute diff, or the errors that prevent applying it.
    pub fn into_changes(self) -> Result<A, FieldErrors> {
        if self.valid {
            Ok(self.changes)
        } else {
            Err(self.errors)
        }
    }
}
