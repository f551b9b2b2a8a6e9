use uuid::Uuid;

use super::{changed, require_id, require_text, trimmed};
use crate::changeset::{Action, Changeset, FieldErrors};
use crate::domain::{Comment, CommentAttrs, CommentFields};

pub type CommentChangeset = Changeset<CommentAttrs, CommentFields>;

/// Build a changeset for `attrs` against `base` (`None` for a new comment).
pub fn comment_changeset(base: Option<&Comment>, attrs: CommentAttrs) -> CommentChangeset {
    let changes = CommentAttrs {
        body: changed(trimmed(attrs.body), base.map(|c| &c.body)),
        post_id: changed(attrs.post_id, base.map(|c| &c.post_id)),
        user_id: changed(attrs.user_id, base.map(|c| &c.user_id)),
    };

    let fields = CommentFields {
        post_id: changes
            .post_id
            .or(base.map(|c| c.post_id))
            .unwrap_or(Uuid::nil()),
        user_id: changes
            .user_id
            .or(base.map(|c| c.user_id))
            .unwrap_or(Uuid::nil()),
        body: changes
            .body
            .as_ref()
            .or(base.map(|c| &c.body))
            .cloned()
            .unwrap_or_default(),
    };

    let mut errors = FieldErrors::new();
    require_text(&mut errors, "body", &fields.body);
    require_id(&mut errors, "post_id", fields.post_id);
    require_id(&mut errors, "user_id", fields.user_id);

    let action = if base.is_some() {
        Action::Update
    } else {
        Action::Insert
    };
    Changeset::new(action, changes, fields, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_requires_parent_and_author() {
        let attrs = CommentAttrs {
            body: Some("Nice post".to_string()),
            ..CommentAttrs::default()
        };
        let errors = comment_changeset(None, attrs).into_changes().unwrap_err();

        assert!(errors.contains("post_id"));
        assert!(errors.contains("user_id"));
        assert!(!errors.contains("body"));
    }

    #[test]
    fn test_unchanged_body_drops_out_of_diff() {
        let now = chrono::Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            body: "same".to_string(),
            created_at: now,
            updated_at: now,
        };
        let attrs = CommentAttrs {
            body: Some(" same ".to_string()),
            ..CommentAttrs::default()
        };
        let changes = comment_changeset(Some(&comment), attrs)
            .into_changes()
            .unwrap();

        assert!(changes.is_empty());
    }
}
