//! Domain-level error types.

use thiserror::Error;

use crate::changeset::FieldErrors;

/// Errors returned by the post and comment contexts.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected before any store interaction.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Pagination parameters out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store-originated failure, passed through unmodified.
    #[error(transparent)]
    Store(#[from] RepoError),
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Repository-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// The row was not there when the write ran (concurrent delete).
    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
