//! Room membership and broadcast relay
//!
//! This module is the heart of the server: the registry tracking which
//! connections belong to which room, and the single dispatch task that
//! fans each inbound message out to every other member of its room.
//!
//! The pieces compose as follows: the HTTP layer (`routes`, `socket`)
//! upgrades a request into a [`ConnectionHandle`] registered with the
//! [`RoomRegistry`]; each connection's read loop tags decoded payloads
//! into [`Envelope`]s and submits them through the [`RelayHandle`];
//! the [`BroadcastRelay`] task delivers each envelope to the room's
//! current members, excluding the sender, evicting any member whose
//! transport has failed.

mod connection;
mod dispatcher;
mod message;
mod registry;
mod routes;
mod socket;


pub use connection::ConnectionHandle;
pub use dispatcher::{BroadcastRelay, RelayHandle};
pub use message::{Envelope, SignalPayload, decode_payload, encode_payload};
pub use registry::{RegistryMetrics, RoomRegistry};
pub use routes::router;
