//! WebSocket upgrade and per-connection tasks
//!
//! Each accepted peer gets two halves: a writer task that is the sole
//! writer to the socket (draining the handle's outbound buffer), and a
//! read loop that decodes inbound frames and feeds them to the shared
//! relay. Every exit path of either half evicts the connection from its
//! room.

use super::connection::ConnectionHandle;
use super::message::{Envelope, decode_payload, encode_payload};
use crate::app::AppState;
use crate::error::{Result, SignalHubError};
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Query parameters for the join endpoint. The `roomID` key matches
/// what existing clients send.
#[derive(Debug, Deserialize)]
pub struct JoinParams {
    #[serde(rename = "roomID", default)]
    pub room_id: Option<String>,
}

/// `GET /join-room?roomID=<id>` - upgrade to a WebSocket and enter the
/// room.
///
/// A missing or empty `roomID` is rejected with 400 before the upgrade
/// ever reaches the relay.
pub async fn join_room_handler(
    Query(params): Query<JoinParams>,
    State(state): State<AppState>,
    upgrade: WebSocketUpgrade,
) -> Result<Response> {
    let room_id = params
        .room_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SignalHubError::bad_request("roomID is required"))?;

    Ok(upgrade.on_upgrade(move |socket| handle_socket(socket, room_id, state)))
}

/// Drive one peer's connection lifecycle
async fn handle_socket(socket: WebSocket, room_id: String, state: AppState) {
    let conn_id = Uuid::new_v4().to_string();

    let (tx, mut rx) = mpsc::channel(state.config.relay.outbound_capacity);
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let handle = Arc::new(ConnectionHandle::new(
        conn_id.clone(),
        room_id.clone(),
        tx,
    ));
    state.registry.join(&room_id, handle);
    tracing::info!(room_id = %room_id, conn_id = %conn_id, "Peer connected");

    // Writer task: the only writer to this socket. Exits when the
    // outbound channel closes (connection evicted) or the socket write
    // fails, and evicts the connection in the latter case so the relay
    // stops dispatching to it.
    let writer_task = tokio::spawn({
        let conn_id = conn_id.clone();
        let registry = state.registry.clone();
        async move {
            while let Some(payload) = rx.recv().await {
                let text = match encode_payload(&payload) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(conn_id = %conn_id, error = %err, "Dropping unencodable payload");
                        continue;
                    }
                };
                if ws_sender.send(WsMessage::Text(text.into())).await.is_err() {
                    break;
                }
            }
            registry.unregister(&conn_id);
        }
    });

    // Read loop: decode each inbound frame and hand it to the relay.
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(WsMessage::Text(text)) => {
                let payload = match decode_payload(text.as_str()) {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!(
                            conn_id = %conn_id,
                            error = %err,
                            "Undecodable frame, closing connection"
                        );
                        break;
                    }
                };

                let envelope = Envelope::new(room_id.clone(), conn_id.clone(), payload);
                if state.relay.submit(envelope).await.is_err() {
                    tracing::error!(conn_id = %conn_id, "Relay unavailable, closing connection");
                    break;
                }
            }
            Ok(WsMessage::Close(_)) => break,
            Ok(WsMessage::Binary(_)) => {
                tracing::debug!(conn_id = %conn_id, "Ignoring binary frame");
            }
            // Ping/pong are answered by the protocol layer
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(conn_id = %conn_id, error = %err, "WebSocket receive error");
                break;
            }
        }
    }

    // Evict synchronously with read-loop termination, whichever way it
    // ended. Unregister is idempotent across the two tasks.
    state.registry.unregister(&conn_id);
    writer_task.abort();
    tracing::info!(room_id = %room_id, conn_id = %conn_id, "Peer disconnected");
}
