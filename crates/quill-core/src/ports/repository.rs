use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentAttrs, Post, PostAttrs, Record};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining the storage gateway operations.
///
/// Implementations assign ids and timestamps on insert.
#[async_trait]
pub trait BaseRepository<T: Record, ID>: Send + Sync {
    /// Fetch every row, in store-default order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Fetch one page of rows plus the total row count.
    async fn find_page(&self, request: PageRequest) -> Result<Page<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new row.
    async fn insert(&self, fields: T::Fields) -> Result<T, RepoError>;

    /// Delete a previously loaded entity, returning it.
    ///
    /// Fails with [`RepoError::NotFound`] when the row is already gone.
    async fn delete(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Write only the fields present in `changes`.
    async fn update(&self, post: Post, changes: PostAttrs) -> Result<Post, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Every comment whose `post_id` equals the argument.
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Write only the fields present in `changes`.
    async fn update(&self, comment: Comment, changes: CommentAttrs)
    -> Result<Comment, RepoError>;
}
