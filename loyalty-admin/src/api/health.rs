//! Liveness endpoints

use axum::Json;

/// GET /
pub async fn root() -> &'static str {
    "Admin Panel API is running"
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "loyalty-admin",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
