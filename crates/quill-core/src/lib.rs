//! # Quill Core
//!
//! The domain layer of Quill.
//! Entities, changesets, pagination and the post/comment contexts live here;
//! persistence is reached only through the traits in [`ports`].

pub mod changeset;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod validation;

pub use changeset::{Action, Changeset, FieldErrors};
pub use error::{DomainError, RepoError};
pub use pagination::{Page, PageRequest};
pub use services::{Comments, Posts};
