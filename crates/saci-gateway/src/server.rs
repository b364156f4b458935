// SPDX-FileCopyrightText: 2026 Saci Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the relay gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use saci_core::SaciError;
use saci_relay::Pipeline;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The relay pipeline handling inbound events.
    pub pipeline: Arc<Pipeline>,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Gateway server configuration (mirrors GatewayConfig from saci-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub bind_address: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router. Exposed separately from [`start_server`] so
/// tests can drive it in-process.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/webhook", post(handlers::post_webhook))
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured address:port and serves:
/// - POST /webhook (inbound Z-API events)
/// - GET /health
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SaciError> {
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SaciError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SaciError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
