//! API handlers for message submission and channel views

use axum::Json;
use axum::extract::{Path, State};
use courier_core::{ChannelKind, ChannelView, MessageId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::errors::WebError;
use crate::server::AppState;

/// Body of a submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Message content; blank content is ignored
    pub content: String,
}

/// Result of a submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// False when the content was blank and nothing was queued
    pub accepted: bool,
    /// Id of the stored message, when accepted
    pub id: Option<String>,
}

impl From<Option<MessageId>> for SubmitResponse {
    fn from(id: Option<MessageId>) -> Self {
        Self {
            accepted: id.is_some(),
            id: id.map(|id| id.to_string()),
        }
    }
}

/// Both channels side by side.
#[derive(Debug, Serialize)]
pub struct ChannelViews {
    /// Reliable channel messages and stats
    pub reliable: ChannelView,
    /// Unreliable channel messages and stats
    pub unreliable: ChannelView,
}

/// Queues a message on the reliable channel.
///
/// # Errors
/// - `WebError::Engine` - Engine actor is not running
pub async fn api_submit_reliable(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, WebError> {
    let id = state.engine.submit_reliable(request.content).await?;
    Ok(Json(id.into()))
}

/// Queues a message on the unreliable channel.
///
/// # Errors
/// - `WebError::Engine` - Engine actor is not running
pub async fn api_submit_unreliable(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, WebError> {
    let id = state.engine.submit_unreliable(request.content).await?;
    Ok(Json(id.into()))
}

/// Clears every message and resets both channels' stats.
///
/// # Errors
/// - `WebError::Engine` - Engine actor is not running
pub async fn api_clear(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    state.engine.clear_all().await?;
    Ok(Json(json!({ "cleared": true })))
}

/// Returns one channel's messages in submission order with its stats.
///
/// # Errors
/// - `WebError::UnknownChannel` - Path names neither channel
/// - `WebError::Engine` - Engine actor is not running
pub async fn api_channel_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ChannelView>, WebError> {
    let channel = name
        .parse::<ChannelKind>()
        .map_err(|_| WebError::UnknownChannel { name })?;
    let view = state.engine.channel_view(channel).await?;
    Ok(Json(view))
}

/// Returns views of both channels.
///
/// # Errors
/// - `WebError::Engine` - Engine actor is not running
pub async fn api_channels(State(state): State<AppState>) -> Result<Json<ChannelViews>, WebError> {
    let reliable = state.engine.channel_view(ChannelKind::Reliable).await?;
    let unreliable = state.engine.channel_view(ChannelKind::Unreliable).await?;
    Ok(Json(ChannelViews {
        reliable,
        unreliable,
    }))
}

/// Reports whether the engine actor is running and the server uptime.
pub async fn api_health(State(state): State<AppState>) -> Json<Value> {
    let status = if state.engine.is_running() {
        "ok"
    } else {
        "engine_stopped"
    };

    Json(json!({
        "status": status,
        "uptime_seconds": state.server_started_at.elapsed().as_secs(),
    }))
}
