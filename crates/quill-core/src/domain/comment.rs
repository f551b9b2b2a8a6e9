use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw comment attributes as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl CommentAttrs {
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.post_id.is_none() && self.user_id.is_none()
    }
}

/// A complete, validated set of writable comment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}

impl Comment {
    pub fn apply(&mut self, changes: CommentAttrs) {
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(post_id) = changes.post_id {
            self.post_id = post_id;
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }
    }
}
