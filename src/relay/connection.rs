//! Connection handle for one peer
//!
//! A `ConnectionHandle` is the server-side representative of one peer's
//! WebSocket. Outbound delivery goes through a bounded channel drained
//! by a single writer task, so writes to the underlying socket are
//! serialized: concurrent `send` calls queue on the channel and frames
//! never interleave.

use super::message::SignalPayload;
use crate::error::{Result, SignalHubError};
use tokio::sync::mpsc;

pub struct ConnectionHandle {
    /// Unique connection identifier
    id: String,
    /// The room this connection belongs to
    room_id: String,
    /// Channel into the connection's writer task
    outbound: mpsc::Sender<SignalPayload>,
}

impl ConnectionHandle {
    pub fn new(
        id: impl Into<String>,
        room_id: impl Into<String>,
        outbound: mpsc::Sender<SignalPayload>,
    ) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            outbound,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Queue a payload for delivery to this peer.
    ///
    /// Blocks while the outbound buffer is full. Fails with
    /// `DeliveryFailed` once the writer task is gone, which means the
    /// underlying transport has terminated; the caller is expected to
    /// evict this handle from its room.
    pub async fn send(&self, payload: SignalPayload) -> Result<()> {
        self.outbound.send(payload).await.map_err(|_| {
            SignalHubError::delivery_failed(format!("connection {} is closed", self.id))
        })
    }

    /// Whether the underlying transport has already terminated.
    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }
}
