// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sairen_agent::Agent;
use sairen_config::model::GatewayConfig;
use sairen_context::ReferenceCache;
use sairen_core::SairenError;
use sairen_extract::ContentExtractor;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::gate::ExtractionGate;
use crate::handlers::{self, ErrorResponse};

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
    pub extractor: ContentExtractor,
    pub references: ReferenceCache,
    pub gate: ExtractionGate,
    /// Process start time for uptime calculation.
    pub started: Instant,
}

impl AppState {
    pub fn new(
        agent: Arc<Agent>,
        extractor: ContentExtractor,
        references: ReferenceCache,
        gate: ExtractionGate,
    ) -> Self {
        Self {
            agent,
            extractor,
            references,
            gate,
            started: Instant::now(),
        }
    }
}

/// Bind address for the gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl From<&GatewayConfig> for ServerConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// Builds the gateway router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ai-agent", post(handlers::post_ai_agent))
        .route("/extract-text", post(handlers::post_extract_text))
        .route("/chat", post(handlers::post_chat))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Maps a handler panic to `500 {error: "Internal server error"}`.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(handlers::INTERNAL_ERROR)),
    )
        .into_response()
}

/// Starts the gateway and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), SairenError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SairenError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("gateway listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SairenError::Internal(format!("gateway server error: {e}")))?;

    info!("gateway stopped");
    Ok(())
}
