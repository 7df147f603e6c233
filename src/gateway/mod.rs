//! HTTP/WebSocket gateway for the orchestration pipeline.

pub mod rest;
pub mod ws;

use anyhow::{Context, Result};
use axum::{
    routing::get,
    routing::post,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::Config;
use crate::health;
use crate::pipeline::Pipeline;
use crate::sessions::SessionStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub sessions: Arc<dyn SessionStore>,
    /// Cap on history entries returned per session query.
    pub history_limit: usize,
}

/// Build the gateway router over an existing pipeline.
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/message", post(rest::handle_message))
        .route("/health", get(rest::handle_health))
        .route("/sessions", get(rest::handle_sessions_list))
        .route(
            "/session/{session_id}",
            get(rest::handle_session_get).delete(rest::handle_session_delete),
        )
        .route("/ws/{user_id}", get(ws::handle_ws))
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state)
}

/// Start the gateway and serve until ctrl-c.
pub async fn run_gateway(host: &str, port: u16, config: Config) -> Result<()> {
    health::init();

    let pipeline = Arc::new(Pipeline::from_config(&config));
    let state = AppState {
        sessions: pipeline.sessions(),
        pipeline,
        history_limit: config.sessions.max_history_entries,
    };
    let app = build_router(state, &config);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind gateway to {host}:{port}"))?;
    let addr = listener.local_addr().context("gateway local_addr")?;
    tracing::info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server terminated unexpectedly")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install ctrl-c handler");
    }
}
