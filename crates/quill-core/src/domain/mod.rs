//! Domain entities - the core business objects.

mod comment;
mod post;

pub use comment::{Comment, CommentAttrs, CommentFields};
pub use post::{Post, PostAttrs, PostFields};

/// A stored entity and the validated field set it is inserted from.
pub trait Record {
    type Fields: Send;
}

impl Record for Post {
    type Fields = PostFields;
}

impl Record for Comment {
    type Fields = CommentFields;
}
