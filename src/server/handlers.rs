//! HTTP route handlers
//!
//! Service banner and health check.

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// Root endpoint handler
pub async fn index() -> HttpResponse {
    let build = crate::build_info();
    HttpResponse::Ok().json(json!({
        "name": "CESE Backend API",
        "version": build.version,
        "message": "Context engineering six-elements backend service",
        "git_hash": build.git_hash,
    }))
}

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.storage.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "message": "CESE Backend Service is running",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": crate::VERSION,
        })),
        Err(e) => {
            warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "message": "Storage unavailable",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        }
    }
}
