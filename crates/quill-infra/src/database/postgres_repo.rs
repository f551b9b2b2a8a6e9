//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use quill_core::domain::{Comment, CommentAttrs, Post, PostAttrs};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn update(&self, post: Post, changes: PostAttrs) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %post.id, "Updating post");

        // Only the changed columns are Set; the rest stay NotSet and out of the UPDATE.
        let mut active = post::ActiveModel {
            id: Unchanged(post.id),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }
        if let Some(user_id) = changes.user_id {
            active.user_id = Set(user_id);
        }

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, comment: Comment, changes: CommentAttrs) -> Result<Comment, RepoError> {
        tracing::debug!(comment_id = %comment.id, "Updating comment");

        let mut active = comment::ActiveModel {
            id: Unchanged(comment.id),
            ..Default::default()
        };
        if let Some(body) = changes.body {
            active.body = Set(body);
        }
        if let Some(post_id) = changes.post_id {
            active.post_id = Set(post_id);
        }
        if let Some(user_id) = changes.user_id {
            active.user_id = Set(user_id);
        }

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}
