use axum::response::Json;
use serde_json::{Value, json};

/// Health check handler
///
/// Public and never rate limited, so load balancers can probe it freely.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
