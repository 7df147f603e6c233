//! WebSocket endpoint — real-time chat over `/ws/{user_id}`.
//!
//! Each connection is handled independently; messages on one connection are
//! processed sequentially, one pipeline pass at a time.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;
use crate::routing::UserRole;

/// Inbound WebSocket payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WsInbound {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Parse one inbound frame, reporting a client-friendly error string.
pub fn parse_inbound(text: &str) -> Result<WsInbound, String> {
    serde_json::from_str(text).map_err(|e| format!("invalid message payload: {e}"))
}

/// GET /ws/{user_id} — upgrade to a chat WebSocket.
pub async fn handle_ws(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, user_id, state))
}

async fn ws_session(mut socket: WebSocket, user_id: String, state: AppState) {
    tracing::info!(user_id = %user_id, "websocket connected");

    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(error) => {
                tracing::info!(user_id = %user_id, error = %error, "websocket receive error");
                break;
            }
        };

        let inbound = match parse_inbound(text.as_str()) {
            Ok(inbound) => inbound,
            Err(detail) => {
                let payload = serde_json::json!({
                    "type": "error",
                    "error": detail,
                    "timestamp": Utc::now(),
                });
                if send_json(&mut socket, &payload).await.is_err() {
                    break;
                }
                continue;
            }
        };

        let ack = serde_json::json!({"type": "ack", "timestamp": Utc::now()});
        if send_json(&mut socket, &ack).await.is_err() {
            break;
        }

        let role = inbound
            .role
            .as_deref()
            .map(UserRole::parse)
            .unwrap_or_default();
        let payload = match state
            .pipeline
            .process_message(
                &user_id,
                &inbound.message,
                inbound.session_id.as_deref(),
                role,
            )
            .await
        {
            Ok(outcome) => serde_json::json!({
                "type": "response",
                "data": {
                    "success": outcome.envelope.success,
                    "request_id": outcome.request_id,
                    "response": outcome.envelope,
                    "agent_type": outcome.agent,
                    "session_id": outcome.session_id,
                },
                "timestamp": Utc::now(),
            }),
            Err(error) => {
                tracing::error!(user_id = %user_id, error = %error, "pipeline failure");
                serde_json::json!({
                    "type": "error",
                    "error": "internal processing failure",
                    "timestamp": Utc::now(),
                })
            }
        };

        if send_json(&mut socket, &payload).await.is_err() {
            break;
        }
    }

    tracing::info!(user_id = %user_id, "websocket disconnected");
}

async fn send_json(socket: &mut WebSocket, payload: &serde_json::Value) -> Result<(), axum::Error> {
    let rendered = payload.to_string();
    socket.send(Message::Text(rendered.into())).await
}
