//! Broadcast relay
//!
//! The single dispatch task for the whole server. Every receive loop
//! feeds decoded messages into one bounded intake channel; one task
//! drains it and fans each message out to the sender's room-mates.
//!
//! Exactly one dispatch task must exist per registry: multiple tasks
//! draining the same intake would race to deliver the same message.
//! `BroadcastRelay::new` hands out the intake sender and the relay as a
//! pair so the task can only be spawned from an explicitly constructed
//! relay, never implicitly per connection.

use super::message::Envelope;
use super::registry::RoomRegistry;
use crate::error::{Result, SignalHubError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cloneable intake handle for feeding messages to the relay
#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<Envelope>,
}

impl RelayHandle {
    /// Hand a message to the dispatch task.
    ///
    /// Applies backpressure: when the intake queue is full this blocks
    /// the producing receive loop instead of dropping the message or
    /// growing without bound. Fails only if the dispatch task is gone.
    pub async fn submit(&self, envelope: Envelope) -> Result<()> {
        self.tx
            .send(envelope)
            .await
            .map_err(|_| SignalHubError::service_unavailable("relay dispatch task is not running"))
    }
}

/// The broadcast dispatch loop
pub struct BroadcastRelay {
    registry: Arc<RoomRegistry>,
    intake: mpsc::Receiver<Envelope>,
}

impl BroadcastRelay {
    /// Create a relay over `registry` with a bounded intake queue.
    pub fn new(registry: Arc<RoomRegistry>, intake_capacity: usize) -> (RelayHandle, Self) {
        let (tx, intake) = mpsc::channel(intake_capacity);
        (RelayHandle { tx }, Self { registry, intake })
    }

    /// Spawn the dispatch task.
    ///
    /// Runs until every `RelayHandle` is dropped; there is no other
    /// terminal state.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        tracing::debug!("Broadcast relay started");
        while let Some(envelope) = self.intake.recv().await {
            self.dispatch(envelope).await;
        }
        tracing::debug!("Broadcast relay stopped");
    }

    /// Deliver one message to every room member except the sender.
    ///
    /// Processing recipients sequentially keeps each sender's messages
    /// ordered at every recipient. A failed delivery evicts that
    /// recipient and never aborts the rest of the fan-out.
    async fn dispatch(&self, envelope: Envelope) {
        let members = self.registry.members_of(&envelope.room_id);

        for member in members {
            if member.id() == envelope.sender_id {
                continue;
            }

            if let Err(err) = member.send(envelope.payload.clone()).await {
                tracing::warn!(
                    room_id = %envelope.room_id,
                    conn_id = %member.id(),
                    error = %err,
                    "Delivery failed, evicting connection"
                );
                self.registry.unregister(member.id());
            }
        }
    }
}
