//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, storage) = match &state.db {
        #[cfg(feature = "postgres")]
        Some(db) => match db.main.ping().await {
            Ok(()) => ("ok", "postgres"),
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                ("degraded", "postgres")
            }
        },
        #[cfg(not(feature = "postgres"))]
        Some(_) => ("ok", "unknown"),
        None => ("ok", "in-memory"),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
