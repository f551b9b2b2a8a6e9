//! # Quill Infrastructure
//!
//! Concrete implementations of the storage ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! The in-memory store is always built; with `default-features = false` it is
//! the only adapter.

pub mod database;
pub mod memory;

pub use database::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::{PostgresCommentRepository, PostgresPostRepository};
