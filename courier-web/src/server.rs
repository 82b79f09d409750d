//! JSON API server for Courier
//!
//! Exposes the delivery engine over HTTP: submission, clear, and per-channel
//! views, plus the placeholder relay endpoint.

use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use courier_core::CourierConfig;
use courier_sim::{DeliveryEngineHandle, spawn_delivery_engine};
use tower_http::cors::CorsLayer;

use crate::handlers::{
    api_channel_view, api_channels, api_clear, api_health, api_submit_reliable,
    api_submit_unreliable, relay_info, relay_message,
};

/// Path of the placeholder relay endpoint.
pub const RELAY_PATH: &str = "/api/websocket";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the delivery engine actor
    pub engine: DeliveryEngineHandle,
    /// When the server process started, for uptime reporting
    pub server_started_at: Instant,
}

impl AppState {
    /// Creates state around a running engine actor.
    pub fn new(engine: DeliveryEngineHandle) -> Self {
        Self {
            engine,
            server_started_at: Instant::now(),
        }
    }
}

/// Builds the application router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Submission API
        .route("/api/reliable", post(api_submit_reliable))
        .route("/api/unreliable", post(api_submit_unreliable))
        .route("/api/clear", post(api_clear))
        // Channel views
        .route("/api/channels", get(api_channels))
        .route("/api/channels/{kind}", get(api_channel_view))
        .route("/api/health", get(api_health))
        // Placeholder relay
        .route(RELAY_PATH, get(relay_info).post(relay_message))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Spawns the delivery engine and serves the API until the process exits.
///
/// # Errors
///
/// - `EngineError::Configuration` - Invalid channel configuration
/// - `std::io::Error` - Address could not be parsed or bound
pub async fn run_server(config: CourierConfig) -> Result<(), Box<dyn std::error::Error>> {
    let address: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let engine = spawn_delivery_engine(config)?;
    let app = build_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Courier API server running on http://{address}");
    axum::serve(listener, app).await?;
    Ok(())
}
