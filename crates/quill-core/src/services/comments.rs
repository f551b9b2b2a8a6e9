use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentAttrs};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::CommentRepository;
use crate::validation::{CommentChangeset, comment_changeset};

/// Comment context.
#[derive(Clone)]
pub struct Comments {
    repo: Arc<dyn CommentRepository>,
}

impl Comments {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_comments(&self) -> Result<Vec<Comment>, DomainError> {
        tracing::debug!("Listing comments");
        Ok(self.repo.find_all().await?)
    }

    /// Comments attached to one post. Comments on other posts are never included.
    pub async fn list_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        tracing::debug!(post_id = %post_id, "Listing comments for post");
        Ok(self.repo.find_by_post_id(post_id).await?)
    }

    pub async fn list_comments_paginated(
        &self,
        limit: i64,
        page: i64,
    ) -> Result<Page<Comment>, DomainError> {
        let request = PageRequest::new(limit, page)?;
        tracing::debug!(limit, page, "Listing comments page");
        Ok(self.repo.find_page(request).await?)
    }

    pub async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        tracing::debug!(comment_id = %id, "Fetching comment");
        Ok(self.repo.find_by_id(id).await?)
    }

    /// A missing parent post surfaces as a store constraint violation.
    pub async fn create_comment(&self, attrs: CommentAttrs) -> Result<Comment, DomainError> {
        let fields = comment_changeset(None, attrs)
            .into_fields()
            .inspect_err(|errors| {
                tracing::warn!(%errors, "Rejected comment create");
            })?;

        let comment = self.repo.insert(fields).await?;
        tracing::debug!(comment_id = %comment.id, post_id = %comment.post_id, "Comment created");
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        comment: Comment,
        attrs: CommentAttrs,
    ) -> Result<Comment, DomainError> {
        let changes = comment_changeset(Some(&comment), attrs)
            .into_changes()
            .inspect_err(|errors| {
                tracing::warn!(comment_id = %comment.id, %errors, "Rejected comment update");
            })?;

        if changes.is_empty() {
            return Ok(comment);
        }

        let id = comment.id;
        let comment = self.repo.update(comment, changes).await?;
        tracing::debug!(comment_id = %id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete_comment(&self, comment: Comment) -> Result<Comment, DomainError> {
        tracing::debug!(comment_id = %comment.id, "Deleting comment");
        Ok(self.repo.delete(comment).await?)
    }

    pub fn change_comment(&self, comment: Option<&Comment>, attrs: CommentAttrs) -> CommentChangeset {
        comment_changeset(comment, attrs)
    }
}
