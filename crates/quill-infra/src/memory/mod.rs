//! In-memory store - used when no database is configured, and in tests.
//!
//! Posts and comments share one set of tables so the comment → post
//! foreign key behaves like the PostgreSQL schema: inserting a comment for a
//! missing post and deleting a post that still has comments are both
//! rejected with [`RepoError::Constraint`]. Rows are kept in insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, CommentAttrs, CommentFields, Post, PostAttrs, PostFields};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository};

#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn post_exists(&self, id: Uuid) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }
}

fn page_of<T: Clone>(rows: &[T], request: PageRequest) -> Page<T> {
    let items = rows
        .iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .cloned()
        .collect();
    Page::new(items, request, rows.len() as u64)
}

fn missing_post(post_id: Uuid) -> RepoError {
    RepoError::Constraint(format!("comments.post_id references missing post {post_id}"))
}

/// Shared tables behind the in-memory repositories.
///
/// Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.clone())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        Ok(page_of(&self.tables.read().await.posts, request))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, fields: PostFields) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: fields.user_id,
            title: fields.title,
            body: fields.body,
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.posts.push(post.clone());
        Ok(post)
    }

    async fn delete(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        let index = tables
            .posts
            .iter()
            .position(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        if tables.comments.iter().any(|c| c.post_id == post.id) {
            return Err(RepoError::Constraint(format!(
                "post {} is still referenced from comments",
                post.id
            )));
        }

        tables.posts.remove(index);
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn update(&self, post: Post, changes: PostAttrs) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        stored.apply(changes);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_all(&self) -> Result<Vec<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.clone())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Comment>, RepoError> {
        Ok(page_of(&self.tables.read().await.comments, request))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, fields: CommentFields) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.post_exists(fields.post_id) {
            return Err(missing_post(fields.post_id));
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: fields.post_id,
            user_id: fields.user_id,
            body: fields.body,
            created_at: now,
            updated_at: now,
        };

        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;

        let index = tables
            .comments
            .iter()
            .position(|c| c.id == comment.id)
            .ok_or(RepoError::NotFound)?;

        tables.comments.remove(index);
        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn update(&self, comment: Comment, changes: CommentAttrs) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;

        if let Some(post_id) = changes.post_id {
            if !tables.post_exists(post_id) {
                return Err(missing_post(post_id));
            }
        }

        let stored = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or(RepoError::NotFound)?;

        stored.apply(changes);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}
