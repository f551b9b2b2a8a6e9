//! Entity validators.
//!
//! Each validator trims text input, diffs it against the base entity (if any)
//! and checks the merged result. Nothing here touches the store.

mod comment;
mod post;

pub use comment::{CommentChangeset, comment_changeset};
pub use post::{PostChangeset, post_changeset};

use uuid::Uuid;

use crate::changeset::FieldErrors;

/// Longest title the `posts.title` column accepts.
pub const MAX_TITLE_LENGTH: usize = 255;

pub(crate) const BLANK: &str = "can't be blank";

pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Keep `new` only when it differs from `current`.
pub(crate) fn changed<T: PartialEq>(new: Option<T>, current: Option<&T>) -> Option<T> {
    match (new, current) {
        (Some(new), Some(current)) if new == *current => None,
        (new, _) => new,
    }
}

pub(crate) fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, BLANK);
    }
}

pub(crate) fn require_id(errors: &mut FieldErrors, field: &'static str, value: Uuid) {
    if value.is_nil() {
        errors.add(field, BLANK);
    }
}

pub(crate) fn max_length(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, format!("should be at most {max} character(s)"));
    }
}
