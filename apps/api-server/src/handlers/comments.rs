//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, CommentAttrs};
use quill_core::pagination::DEFAULT_PAGE_SIZE;
use quill_shared::ApiResponse;
use quill_shared::dto::{CommentResponse, PaginationQuery};

use super::paged;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        user_id: comment.user_id.to_string(),
        body: comment.body,
        created_at: comment.created_at.to_rfc3339(),
        updated_at: comment.updated_at.to_rfc3339(),
    }
}

async fn load(state: &AppState, id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .get_comment(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment with id {} not found", id)))
}

/// GET /api/comments[?limit=&page=]
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    if query.is_paginated() {
        let page = state
            .comments
            .list_comments_paginated(
                query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
                query.page.unwrap_or(1),
            )
            .await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(paged(page, comment_response))));
    }

    let comments: Vec<_> = state
        .comments
        .list_comments()
        .await?
        .into_iter()
        .map(comment_response)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// GET /api/posts/{id}/comments
pub async fn list_for_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments: Vec<_> = state
        .comments
        .list_comments_by_post(path.into_inner())
        .await?
        .into_iter()
        .map(comment_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CommentAttrs>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.create_comment(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_response(comment))))
}

/// GET /api/comments/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let comment = load(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment_response(comment))))
}

/// PATCH /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentAttrs>,
) -> AppResult<HttpResponse> {
    let comment = load(&state, path.into_inner()).await?;
    let comment = state
        .comments
        .update_comment(comment, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment_response(comment))))
}

/// DELETE /api/comments/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let comment = load(&state, path.into_inner()).await?;
    let comment = state.comments.delete_comment(comment).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        comment_response(comment),
        "Comment deleted",
    )))
}

/// POST /api/comments/changeset
pub async fn changeset(
    state: web::Data<AppState>,
    body: web::Json<CommentAttrs>,
) -> AppResult<HttpResponse> {
    let changeset = state.comments.change_comment(None, body.into_inner());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(changeset)))
}
