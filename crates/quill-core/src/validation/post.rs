use uuid::Uuid;

use super::{MAX_TITLE_LENGTH, changed, max_length, require_id, require_text, trimmed};
use crate::changeset::{Action, Changeset, FieldErrors};
use crate::domain::{Post, PostAttrs, PostFields};

pub type PostChangeset = Changeset<PostAttrs, PostFields>;

/// Build a changeset for `attrs` against `base` (`None` for a new post).
pub fn post_changeset(base: Option<&Post>, attrs: PostAttrs) -> PostChangeset {
    let changes = PostAttrs {
        title: changed(trimmed(attrs.title), base.map(|p| &p.title)),
        body: changed(trimmed(attrs.body), base.map(|p| &p.body)),
        user_id: changed(attrs.user_id, base.map(|p| &p.user_id)),
    };

    let fields = PostFields {
        user_id: changes
            .user_id
            .or(base.map(|p| p.user_id))
            .unwrap_or(Uuid::nil()),
        title: merged(changes.title.as_ref(), base.map(|p| &p.title)),
        body: merged(changes.body.as_ref(), base.map(|p| &p.body)),
    };

    let mut errors = FieldErrors::new();
    require_text(&mut errors, "title", &fields.title);
    max_length(&mut errors, "title", &fields.title, MAX_TITLE_LENGTH);
    require_text(&mut errors, "body", &fields.body);
    require_id(&mut errors, "user_id", fields.user_id);

    let action = if base.is_some() {
        Action::Update
    } else {
        Action::Insert
    };
    Changeset::new(action, changes, fields, errors)
}

fn merged(change: Option<&String>, current: Option<&String>) -> String {
    change.or(current).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn post() -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Hello".to_string(),
            body: "World".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_post_requires_every_field() {
        let changeset = post_changeset(None, PostAttrs::default());

        assert_eq!(changeset.action(), Action::Insert);
        let errors = changeset.errors();
        assert!(errors.contains("title"));
        assert!(errors.contains("body"));
        assert!(errors.contains("user_id"));
    }

    #[test]
    fn test_whitespace_only_title_is_blank() {
        let attrs = PostAttrs {
            title: Some("   ".to_string()),
            body: Some("text".to_string()),
            user_id: Some(Uuid::new_v4()),
        };
        let errors = post_changeset(None, attrs).into_fields().unwrap_err();

        assert_eq!(errors.get("title").unwrap(), ["can't be blank"]);
        assert!(!errors.contains("body"));
    }

    #[test]
    fn test_title_length_limit() {
        let attrs = PostAttrs {
            title: Some("x".repeat(MAX_TITLE_LENGTH + 1)),
            body: Some("text".to_string()),
            user_id: Some(Uuid::new_v4()),
        };
        let changeset = post_changeset(None, attrs);

        assert_eq!(
            changeset.errors().get("title").unwrap(),
            ["should be at most 255 character(s)"]
        );
    }

    #[test]
    fn test_valid_new_post_is_trimmed() {
        let user_id = Uuid::new_v4();
        let attrs = PostAttrs {
            title: Some("  Title ".to_string()),
            body: Some("Body\n".to_string()),
            user_id: Some(user_id),
        };
        let fields = post_changeset(None, attrs).into_fields().unwrap();

        assert_eq!(fields.title, "Title");
        assert_eq!(fields.body, "Body");
        assert_eq!(fields.user_id, user_id);
    }

    #[test]
    fn test_update_keeps_only_changed_fields() {
        let post = post();
        let attrs = PostAttrs {
            title: Some("x".to_string()),
            body: Some(post.body.clone()),
            user_id: None,
        };
        let changeset = post_changeset(Some(&post), attrs);

        assert_eq!(changeset.action(), Action::Update);
        assert_eq!(
            changeset.changes(),
            &PostAttrs {
                title: Some("x".to_string()),
                ..PostAttrs::default()
            }
        );
        let fields = changeset.into_fields().unwrap();
        assert_eq!(fields.body, post.body);
        assert_eq!(fields.user_id, post.user_id);
    }

    #[test]
    fn test_update_cannot_blank_a_required_field() {
        let post = post();
        let attrs = PostAttrs {
            body: Some(String::new()),
            ..PostAttrs::default()
        };
        let changeset = post_changeset(Some(&post), attrs);

        assert!(!changeset.is_valid());
        assert!(changeset.errors().contains("body"));
    }
}
