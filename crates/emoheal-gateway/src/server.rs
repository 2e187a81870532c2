// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use axum::{routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use emoheal_core::EmohealError;

use crate::handlers;
use crate::ws;
use crate::GatewayState;

/// Gateway server configuration (mirrors GatewayConfig from emoheal-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Attach a permissive CORS layer.
    pub cors_permissive: bool,
}

/// Builds the gateway router over the shared state.
pub fn build_router(state: GatewayState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/api/chat-history/{user_id}", get(handlers::get_chat_history))
        .route("/api/mood-summary/{user_id}", get(handlers::get_mood_summary))
        .route("/api/crisis-alerts/{user_id}", get(handlers::get_crisis_alerts))
        .route("/api/user-stats/{user_id}", get(handlers::get_user_stats))
        .route("/api/health/database", get(handlers::get_database_health))
        .route("/ws/chat/{user_id}", get(ws::ws_handler))
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Start the gateway HTTP/WebSocket server.
///
/// Binds to the configured host:port and serves until the cancellation
/// token fires; open sockets close with the server.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), EmohealError> {
    let app = build_router(state, config.cors_permissive);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EmohealError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| EmohealError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
