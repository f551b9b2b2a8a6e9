use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw post attributes as supplied by a caller. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl PostAttrs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.user_id.is_none()
    }
}

/// A complete, validated set of writable post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Overlay an attribute diff onto this post.
    pub fn apply(&mut self, changes: PostAttrs) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }
    }
}
