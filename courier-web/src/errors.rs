//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use courier_sim::EngineError;
use serde_json::json;

/// Errors surfaced by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Engine actor stopped or rejected its configuration.
    #[error("Delivery engine error: {0}")]
    Engine(#[from] EngineError),

    /// Path named neither channel.
    #[error("Unknown channel: {name}")]
    UnknownChannel {
        /// Channel name as requested
        name: String,
    },
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self {
            WebError::Engine(EngineError::Shutdown) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Engine(EngineError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::UnknownChannel { .. } => StatusCode::NOT_FOUND,
        };

        tracing::warn!("Request failed: {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
