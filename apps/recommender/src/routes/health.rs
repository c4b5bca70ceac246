use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe; always 200 while the process is serving.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Job recommender server is running"
    }))
}
