//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::{Comments, Posts};
use quill_infra::InMemoryStore;
use quill_infra::database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresCommentRepository, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Posts,
    pub comments: Comments,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => Self::postgres(Arc::new(connections)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: Arc<DatabaseConnections>) -> Self {
        let posts = PostgresPostRepository::new(connections.main.clone());
        let comments = PostgresCommentRepository::new(connections.main.clone());

        Self {
            posts: Posts::new(Arc::new(posts)),
            comments: Comments::new(Arc::new(comments)),
            db: Some(connections),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();

        Self {
            posts: Posts::new(Arc::new(store.posts())),
            comments: Comments::new(Arc::new(store.comments())),
            db: None,
        }
    }
}
