use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostAttrs};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::PostRepository;
use crate::validation::{PostChangeset, post_changeset};

/// Post context.
#[derive(Clone)]
pub struct Posts {
    repo: Arc<dyn PostRepository>,
}

impl Posts {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        tracing::debug!("Listing posts");
        Ok(self.repo.find_all().await?)
    }

    /// One page of posts. Fails with `InvalidArgument` for `limit <= 0` or `page < 1`.
    pub async fn list_posts_paginated(
        &self,
        limit: i64,
        page: i64,
    ) -> Result<Page<Post>, DomainError> {
        let request = PageRequest::new(limit, page)?;
        tracing::debug!(limit, page, "Listing posts page");
        Ok(self.repo.find_page(request).await?)
    }

    /// Returns `None` when no post has this id.
    pub async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        tracing::debug!(post_id = %id, "Fetching post");
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn create_post(&self, attrs: PostAttrs) -> Result<Post, DomainError> {
        let fields = post_changeset(None, attrs).into_fields().inspect_err(|errors| {
            tracing::warn!(%errors, "Rejected post create");
        })?;

        let post = self.repo.insert(fields).await?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Apply `attrs` on top of `post`. Fields absent from `attrs` keep their values.
    pub async fn update_post(&self, post: Post, attrs: PostAttrs) -> Result<Post, DomainError> {
        let changes = post_changeset(Some(&post), attrs)
            .into_changes()
            .inspect_err(|errors| {
                tracing::warn!(post_id = %post.id, %errors, "Rejected post update");
            })?;

        if changes.is_empty() {
            return Ok(post);
        }

        let id = post.id;
        let post = self.repo.update(post, changes).await?;
        tracing::debug!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Delete a post loaded earlier. Posts that still have comments are refused by the store.
    pub async fn delete_post(&self, post: Post) -> Result<Post, DomainError> {
        tracing::debug!(post_id = %post.id, "Deleting post");
        Ok(self.repo.delete(post).await?)
    }

    /// Preview the change `attrs` would make, without persisting anything.
    pub fn change_post(&self, post: Option<&Post>, attrs: PostAttrs) -> PostChangeset {
        post_changeset(post, attrs)
    }
}
