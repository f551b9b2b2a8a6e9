//! Contexts - the post and comment operations consumed by transports.
//!
//! Every write validates locally first and only then makes a single store
//! call. Store errors come back as [`DomainError::Store`] untouched.
//!
//! [`DomainError::Store`]: crate::error::DomainError::Store

mod comments;
mod posts;

pub use comments::Comments;
pub use posts::Posts;
