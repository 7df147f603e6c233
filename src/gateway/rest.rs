//! REST handlers for the chat gateway.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::routing::UserRole;
use crate::sessions::SessionFilter;

/// Body of `POST /message`. Malformed bodies are rejected by the JSON
/// extractor with field-level detail before reaching the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Client-declared role hint; defaults to consumer.
    #[serde(default)]
    pub role: Option<String>,
}

/// POST /message — run one message through the pipeline.
pub async fn handle_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let role = body
        .role
        .as_deref()
        .map(UserRole::parse)
        .unwrap_or_default();

    match state
        .pipeline
        .process_message(&body.user_id, &body.message, body.session_id.as_deref(), role)
        .await
    {
        Ok(outcome) => {
            let timestamp = outcome.envelope.timestamp;
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": outcome.envelope.success,
                    "request_id": outcome.request_id,
                    "response": outcome.envelope,
                    "agent_type": outcome.agent,
                    "session_id": outcome.session_id,
                    "timestamp": timestamp,
                })),
            )
        }
        Err(error) => {
            tracing::error!(user_id = %body.user_id, error = %error, "pipeline failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": "internal processing failure",
                })),
            )
        }
    }
}

/// GET /health — component snapshot.
pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = crate::health::snapshot();
    Json(serde_json::json!({
        "status": snapshot.status,
        "service": "kumbuk-gateway",
        "uptime_seconds": snapshot.uptime_seconds,
        "requests_handled": snapshot.requests_handled,
        "agent_failures": snapshot.agent_failures,
        "components": {
            "extractor": "ok",
            "router": "ok",
            "planner": "ok",
            "dispatcher": "ok",
            "sessions": state.sessions.name(),
        },
    }))
}

/// GET /session/{session_id} — session metadata plus history.
pub async fn handle_session_get(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let session = match state.sessions.get(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "success": false,
                    "error": format!("unknown session: {session_id}"),
                })),
            );
        }
        Err(error) => {
            tracing::error!(session_id = %session_id, error = %error, "session lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"success": false, "error": "session lookup failed"})),
            );
        }
    };

    match state
        .sessions
        .history(&session_id, Some(state.history_limit))
        .await
    {
        Ok(history) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "session": session,
                "history": history,
            })),
        ),
        Err(error) => {
            tracing::error!(session_id = %session_id, error = %error, "history lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"success": false, "error": "history lookup failed"})),
            )
        }
    }
}

/// DELETE /session/{session_id} — clear a session.
pub async fn handle_session_delete(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.sessions.clear(&session_id).await {
        Ok(existed) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": existed,
                "message": if existed { "Session cleared" } else { "Session not found" },
            })),
        ),
        Err(error) => {
            tracing::error!(session_id = %session_id, error = %error, "session clear failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"success": false, "error": "session clear failed"})),
            )
        }
    }
}

/// GET /sessions — list known sessions, most recent first.
pub async fn handle_sessions_list(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let filter = SessionFilter {
        limit: Some(state.history_limit),
        ..Default::default()
    };
    match state.sessions.list(&filter).await {
        Ok(sessions) => (
            StatusCode::OK,
            Json(serde_json::json!({"success": true, "sessions": sessions})),
        ),
        Err(error) => {
            tracing::error!(error = %error, "session list failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"success": false, "error": "session list failed"})),
            )
        }
    }
}
