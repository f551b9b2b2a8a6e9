//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostAttrs};
use quill_core::pagination::DEFAULT_PAGE_SIZE;
use quill_shared::ApiResponse;
use quill_shared::dto::{PaginationQuery, PostResponse};

use super::paged;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        user_id: post.user_id.to_string(),
        title: post.title,
        body: post.body,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

async fn load(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post with id {} not found", id)))
}

/// GET /api/posts[?limit=&page=]
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    if query.is_paginated() {
        let page = state
            .posts
            .list_posts_paginated(
                query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
                query.page.unwrap_or(1),
            )
            .await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(paged(page, post_response))));
    }

    let posts: Vec<_> = state
        .posts
        .list_posts()
        .await?
        .into_iter()
        .map(post_response)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostAttrs>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create_post(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// GET /api/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = load(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostAttrs>,
) -> AppResult<HttpResponse> {
    let post = load(&state, path.into_inner()).await?;
    let post = state.posts.update_post(post, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = load(&state, path.into_inner()).await?;
    let post = state.posts.delete_post(post).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(post),
        "Post deleted",
    )))
}

/// POST /api/posts/changeset - validate a new post without saving it.
pub async fn changeset(
    state: web::Data<AppState>,
    body: web::Json<PostAttrs>,
) -> AppResult<HttpResponse> {
    let changeset = state.posts.change_post(None, body.into_inner());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(changeset)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn post_json(title: &str) -> Value {
        json!({
            "title": title,
            "body": "Some body",
            "user_id": uuid::Uuid::new_v4(),
        })
    }

    #[actix_rt::test]
    async fn test_create_and_fetch_post() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_json("Hello"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["data"]["title"], "Hello");
    }

    #[actix_rt::test]
    async fn test_invalid_post_is_unprocessable() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "body": "no title" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["errors"]["title"][0], "can't be blank");
        assert_eq!(problem["errors"]["user_id"][0], "can't be blank");
    }

    #[actix_rt::test]
    async fn test_pagination_parameters() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        for n in 0..5 {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(post_json(&format!("Post {n}")))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/posts?limit=2&page=1")
            .to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["data"]["meta"]["total_count"], 5);

        for uri in [
            "/api/posts?limit=0&page=1",
            "/api/posts?limit=9223372036854775807&page=4",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_rt::test]
    async fn test_unknown_post_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_changeset_preview_reports_errors() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts/changeset")
            .set_json(json!({ "title": "Only a title" }))
            .to_request();
        let preview: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(preview["data"]["action"], "insert");
        assert_eq!(preview["data"]["valid"], false);
        assert!(preview["data"]["errors"]["body"].is_array());

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let listing: Value = test::call_and_read_body_json(&app, req).await;
        assert!(listing["data"].as_array().unwrap().is_empty());
    }
}
