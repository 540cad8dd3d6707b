//! Liveness endpoint
//!
//! Reports that the receiver process is up. It does not call the pipeline
//! service, so an upstream outage does not mark the receiver as down.

use axum::Json;
use serde_json::{Value, json};

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
