use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness probe; reachable without a token.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}
