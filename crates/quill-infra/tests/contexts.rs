//! Post and comment contexts running against the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{CommentAttrs, Post, PostAttrs};
use quill_core::error::{DomainError, RepoError};
use quill_core::{Action, Comments, Posts};
use quill_infra::InMemoryStore;

fn contexts() -> (Posts, Comments) {
    let store = InMemoryStore::new();
    (
        Posts::new(Arc::new(store.posts())),
        Comments::new(Arc::new(store.comments())),
    )
}

fn post_attrs(title: &str) -> PostAttrs {
    PostAttrs {
        title: Some(title.to_string()),
        body: Some(format!("{title} body")),
        user_id: Some(Uuid::new_v4()),
    }
}

fn comment_attrs(post: &Post, body: &str) -> CommentAttrs {
    CommentAttrs {
        body: Some(body.to_string()),
        post_id: Some(post.id),
        user_id: Some(Uuid::new_v4()),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let (posts, _) = contexts();
    let attrs = post_attrs("Hello");

    let created = posts.create_post(attrs.clone()).await.unwrap();
    let fetched = posts.get_post(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created);
    assert_eq!(Some(fetched.title), attrs.title);
    assert_eq!(Some(fetched.body), attrs.body);
    assert_eq!(Some(fetched.user_id), attrs.user_id);
}

#[tokio::test]
async fn test_create_without_title_or_body_writes_nothing() {
    let (posts, _) = contexts();

    for attrs in [
        PostAttrs {
            title: None,
            ..post_attrs("x")
        },
        PostAttrs {
            body: None,
            ..post_attrs("x")
        },
    ] {
        let err = posts.create_post(attrs).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    assert!(posts.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_unknown_post_is_none() {
    let (posts, _) = contexts();

    assert!(posts.get_post(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_then_get_is_none() {
    let (posts, _) = contexts();
    let post = posts.create_post(post_attrs("Short-lived")).await.unwrap();

    let deleted = posts.delete_post(post.clone()).await.unwrap();

    assert_eq!(deleted.id, post.id);
    assert!(posts.get_post(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_of_already_deleted_post_is_not_found() {
    let (posts, _) = contexts();
    let post = posts.create_post(post_attrs("Twice")).await.unwrap();
    posts.delete_post(post.clone()).await.unwrap();

    let err = posts.delete_post(post).await.unwrap_err();

    assert!(matches!(err, DomainError::Store(RepoError::NotFound)));
}

#[tokio::test]
async fn test_paginated_listing() {
    let (posts, _) = contexts();
    for n in 1..=5 {
        posts.create_post(post_attrs(&format!("Post {n}"))).await.unwrap();
    }

    let first = posts.list_posts_paginated(2, 1).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total_count, 5);
    assert_eq!(first.page, 1);
    assert_eq!(first.page_size, 2);

    let last = posts.list_posts_paginated(2, 3).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_next());
}

#[tokio::test]
async fn test_zero_limit_is_invalid_argument() {
    let (posts, comments) = contexts();

    assert!(matches!(
        posts.list_posts_paginated(0, 1).await,
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(matches!(
        comments.list_comments_paginated(10, 0).await,
        Err(DomainError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let (posts, _) = contexts();
    let post = posts.create_post(post_attrs("Original")).await.unwrap();

    let updated = posts
        .update_post(
            post.clone(),
            PostAttrs {
                title: Some("x".to_string()),
                ..PostAttrs::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "x");
    assert_eq!(updated.body, post.body);
    assert_eq!(updated.user_id, post.user_id);
    assert_eq!(updated.created_at, post.created_at);

    let stored = posts.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_invalid_update_leaves_row_untouched() {
    let (posts, _) = contexts();
    let post = posts.create_post(post_attrs("Keep")).await.unwrap();

    let err = posts
        .update_post(
            post.clone(),
            PostAttrs {
                title: Some("  ".to_string()),
                ..PostAttrs::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ref e) if e.contains("title")));
    assert_eq!(posts.get_post(post.id).await.unwrap().unwrap(), post);
}

#[tokio::test]
async fn test_change_post_previews_without_persisting() {
    let (posts, _) = contexts();
    let post = posts.create_post(post_attrs("Draft")).await.unwrap();

    let changeset = posts.change_post(
        Some(&post),
        PostAttrs {
            title: Some("Renamed".to_string()),
            ..PostAttrs::default()
        },
    );

    assert!(changeset.is_valid());
    assert_eq!(changeset.action(), Action::Update);
    assert_eq!(changeset.changes().title.as_deref(), Some("Renamed"));
    assert_eq!(posts.get_post(post.id).await.unwrap().unwrap().title, "Draft");
}

#[tokio::test]
async fn test_comments_are_scoped_to_their_post() {
    let (posts, comments) = contexts();
    let first = posts.create_post(post_attrs("First")).await.unwrap();
    let second = posts.create_post(post_attrs("Second")).await.unwrap();

    comments.create_comment(comment_attrs(&first, "a")).await.unwrap();
    comments.create_comment(comment_attrs(&second, "b")).await.unwrap();
    comments.create_comment(comment_attrs(&first, "c")).await.unwrap();

    let on_first = comments.list_comments_by_post(first.id).await.unwrap();
    let bodies: Vec<_> = on_first.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["a", "c"]);
    assert!(on_first.iter().all(|c| c.post_id == first.id));

    assert_eq!(comments.list_comments().await.unwrap().len(), 3);
    assert!(
        comments
            .list_comments_by_post(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_comment_requires_existing_post() {
    let (_, comments) = contexts();

    let err = comments
        .create_comment(CommentAttrs {
            body: Some("orphan".to_string()),
            post_id: Some(Uuid::new_v4()),
            user_id: Some(Uuid::new_v4()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Store(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_comment_without_body_is_rejected() {
    let (posts, comments) = contexts();
    let post = posts.create_post(post_attrs("Quiet")).await.unwrap();

    let err = comments
        .create_comment(CommentAttrs {
            body: None,
            ..comment_attrs(&post, "")
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(ref e) if e.contains("body")));
    assert!(comments.list_comments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_post_with_comments_is_restricted() {
    let (posts, comments) = contexts();
    let post = posts.create_post(post_attrs("Busy")).await.unwrap();
    let comment = comments.create_comment(comment_attrs(&post, "hi")).await.unwrap();

    let err = posts.delete_post(post.clone()).await.unwrap_err();
    assert!(matches!(err, DomainError::Store(RepoError::Constraint(_))));
    assert!(posts.get_post(post.id).await.unwrap().is_some());

    comments.delete_comment(comment).await.unwrap();
    posts.delete_post(post.clone()).await.unwrap();
    assert!(posts.get_post(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_comment_update_and_pagination() {
    let (posts, comments) = contexts();
    let post = posts.create_post(post_attrs("Thread")).await.unwrap();
    let comment = comments.create_comment(comment_attrs(&post, "first")).await.unwrap();
    comments.create_comment(comment_attrs(&post, "second")).await.unwrap();

    let updated = comments
        .update_comment(
            comment.clone(),
            CommentAttrs {
                body: Some("edited".to_string()),
                ..CommentAttrs::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.body, "edited");
    assert_eq!(updated.post_id, comment.post_id);
    assert_eq!(updated.user_id, comment.user_id);

    let fetched = comments.get_comment(comment.id).await.unwrap().unwrap();
    assert_eq!(fetched.body, "edited");

    let page = comments.list_comments_paginated(1, 2).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].body, "second");
    assert_eq!(page.total_count, 2);

    let preview = comments.change_comment(None, CommentAttrs::default());
    assert!(!preview.is_valid());
    assert_eq!(preview.action(), Action::Insert);
}
