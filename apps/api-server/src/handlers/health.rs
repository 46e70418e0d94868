//! Health check endpoint.

use actix_web::HttpResponse;

use quill_shared::dto::MessageResponse;

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Server: OK (200)".to_string(),
    })
}
