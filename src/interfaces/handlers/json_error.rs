use actix_web::{HttpResponse, Responder};

/// Catch-all for unknown paths, so 404s carry the same envelope as
/// every other error.
pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": "Route not found"
    }))
}
