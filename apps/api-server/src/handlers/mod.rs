//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;

use actix_web::web;
use quill_core::Page;
use quill_shared::dto::{PageMeta, PagedResponse};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/changeset", web::post().to(posts::changeset))
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::get().to(comments::list_for_post)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::get().to(comments::list))
                    .route("", web::post().to(comments::create))
                    .route("/changeset", web::post().to(comments::changeset))
                    .route("/{id}", web::get().to(comments::show))
                    .route("/{id}", web::patch().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete)),
            ),
    );
}

fn paged<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PagedResponse<U> {
    let page = page.map(f);
    PagedResponse {
        meta: PageMeta {
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
        },
        items: page.items,
    }
}
