//! Placeholder message relay endpoint.
//!
//! Stands in for a real-time socket endpoint. It accepts any JSON payload,
//! logs it and acknowledges with a timestamp. No delivery simulation runs here.

use axum::Json;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::{Value, json};

/// Body returned to plain GET requests.
pub const RELAY_PLACEHOLDER: &str =
    "Message relay endpoint - would handle real-time socket connections in production";

/// Describes the relay endpoint.
pub async fn relay_info() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], RELAY_PLACEHOLDER)
}

/// Logs an incoming JSON message and acknowledges it with a timestamp.
pub async fn relay_message(Json(body): Json<Value>) -> Json<Value> {
    tracing::info!("Received message: {body}");

    Json(json!({
        "success": true,
        "message": "Message processed",
        "timestamp": Utc::now().timestamp_millis(),
    }))
}
