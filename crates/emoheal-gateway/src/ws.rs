// SPDX-FileCopyrightText: 2026 EmoHeal Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for the per-user chat endpoint.
//!
//! Client -> Server (JSON):
//! ```json
//! {"message": "I feel anxious about work"}
//! ```
//!
//! Server -> Client (JSON): the tagged [`ServerEvent`] envelopes
//! (`bot_response`, `crisis_alert`). The first frame on every connection is
//! the fixed welcome message.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use serde::Deserialize;

use emoheal_session::{ChatSession, ServerEvent};

use crate::GatewayState;

/// Chat message from the client. Unknown fields are rejected rather than
/// passed through silently.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WsIncoming {
    message: String,
}

/// WebSocket upgrade handler for `/ws/chat/{user_id}`.
pub async fn ws_handler(
    Path(user_id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Drives one chat connection.
///
/// Each turn is fully processed (classify, extract, select, persist) before
/// the next frame is read -- no overlap within a session. Malformed payloads
/// are logged and skipped; a storage failure on the normal path closes the
/// socket.
async fn handle_socket(mut socket: WebSocket, state: GatewayState, user_id: String) {
    let mut session = ChatSession::new(user_id, state.engine.clone(), state.storage.clone());

    let welcome = session.open(&state.welcome_message);
    if send_event(&mut socket, &welcome).await.is_err() {
        session.close();
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let text_str: &str = &text;
                let incoming: WsIncoming = match serde_json::from_str(text_str) {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::warn!(
                            session_id = session.session_id(),
                            "ignoring malformed chat payload: {e}"
                        );
                        continue;
                    }
                };

                match session.process_turn(&incoming.message).await {
                    Ok(Some(event)) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {} // empty message, keep awaiting
                    Err(e) => {
                        tracing::error!(
                            session_id = session.session_id(),
                            error = %e,
                            "storage failure during turn, closing channel"
                        );
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary, ping (handled by the tungstenite layer)
        }
    }

    session.close();
}

/// Serializes and sends one event frame.
async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("failed to serialize server event: {e}");
            return Ok(());
        }
    };
    socket.send(Message::Text(payload.into())).await
}
