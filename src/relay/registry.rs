//! Room registry
//!
//! Tracks which connections belong to which room. The registry owns the
//! handle map but not the connections' lifecycles: handles are
//! registered at join time and must be evicted on every termination
//! path (read-loop exit, writer failure, failed delivery).

use super::connection::ConnectionHandle;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Registry of rooms and their member connections
///
/// Join, leave, and membership reads go through per-entry locks, so a
/// membership snapshot is never torn by a concurrent mutation.
pub struct RoomRegistry {
    /// Map of room id to member connection ids
    rooms: DashMap<String, HashSet<String>>,
    /// Map of connection id to connection handle
    connections: DashMap<String, Arc<ConnectionHandle>>,
    /// Total rooms ever created (for metrics)
    rooms_created: AtomicU64,
    /// Total connections ever joined (for metrics)
    connections_joined: AtomicU64,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            connections: DashMap::new(),
            rooms_created: AtomicU64::new(0),
            connections_joined: AtomicU64::new(0),
        }
    }

    /// Allocate a fresh room and return its identifier.
    ///
    /// Identifiers are UUID v4, so a collision with an existing room is
    /// not a runtime condition to handle.
    pub fn create_room(&self) -> String {
        let room_id = uuid::Uuid::new_v4().to_string();
        self.rooms.insert(room_id.clone(), HashSet::new());
        self.rooms_created.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(room_id = %room_id, "Room created");
        room_id
    }

    /// Add a connection to a room.
    ///
    /// An unknown room id creates the room lazily, matching the
    /// behavior clients already rely on: a peer may join a room id it
    /// was handed out-of-band even if the creating request hit another
    /// path first.
    pub fn join(&self, room_id: &str, handle: Arc<ConnectionHandle>) {
        let conn_id = handle.id().to_string();
        self.connections.insert(conn_id.clone(), handle);
        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(conn_id.clone());
        self.connections_joined.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(room_id = %room_id, conn_id = %conn_id, "Connection joined room");
    }

    /// Remove a connection from a room's member set.
    ///
    /// Idempotent: safe to call when the member or the room is already
    /// gone. Empty rooms are dropped so abandoned ids do not accumulate.
    pub fn leave(&self, room_id: &str, conn_id: &str) {
        if let Some(mut members) = self.rooms.get_mut(room_id) {
            members.remove(conn_id);
            if members.is_empty() {
                drop(members);
                self.rooms.remove(room_id);
            }
        }
    }

    /// Fully evict a connection: drop its handle and its room
    /// membership. Idempotent.
    ///
    /// Dropping the registry's handle closes the connection's outbound
    /// channel once in-flight snapshots are done with it, which in turn
    /// terminates the writer task.
    pub fn unregister(&self, conn_id: &str) {
        if let Some((_, handle)) = self.connections.remove(conn_id) {
            self.leave(handle.room_id(), conn_id);
            tracing::debug!(
                room_id = %handle.room_id(),
                conn_id = %conn_id,
                "Connection unregistered"
            );
        }
    }

    /// Consistent snapshot of a room's current members.
    ///
    /// The returned Vec is owned: iteration can never observe a
    /// concurrent join or leave mid-set.
    pub fn members_of(&self, room_id: &str) -> Vec<Arc<ConnectionHandle>> {
        let member_ids: Vec<String> = self
            .rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default();

        member_ids
            .iter()
            .filter_map(|id| self.connections.get(id).map(|entry| entry.clone()))
            .collect()
    }

    /// Get a connection handle by id
    pub fn get(&self, conn_id: &str) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(conn_id).map(|entry| entry.clone())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn metrics(&self) -> RegistryMetrics {
        RegistryMetrics {
            active_rooms: self.room_count(),
            active_connections: self.connection_count(),
            rooms_created: self.rooms_created.load(Ordering::Relaxed),
            connections_joined: self.connections_joined.load(Ordering::Relaxed),
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry counters for monitoring
#[derive(Debug, Clone)]
pub struct RegistryMetrics {
    pub active_rooms: usize,
    pub active_connections: usize,
    pub rooms_created: u64,
    pub connections_joined: u64,
}
