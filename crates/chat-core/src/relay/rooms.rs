//! Room membership
//!
//! Maps a routing key to the set of connections joined to it. Every
//! connection joins the room named after its own ID when it connects,
//! which is what makes private messages addressable by connection ID.

use crate::value_objects::ConnectionId;
use std::collections::{HashMap, HashSet};

/// Routing key to member connections
#[derive(Debug, Clone, Default)]
pub struct RoomMembership {
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

impl RoomMembership {
    /// Create an empty membership table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the room `key`
    pub fn join(&mut self, key: impl Into<String>, id: ConnectionId) {
        self.rooms.entry(key.into()).or_default().insert(id);
    }

    /// Add `id` to the room named after itself
    pub fn join_own_room(&mut self, id: &ConnectionId) {
        self.join(id.as_str(), id.clone());
    }

    /// Remove `id` from every room, dropping rooms that become empty
    pub fn leave_all(&mut self, id: &ConnectionId) {
        self.rooms.retain(|_, members| {
            members.remove(id);
            !members.is_empty()
        });
    }

    /// Connections currently joined to `key`
    pub fn members(&self, key: &str) -> Vec<ConnectionId> {
        self.rooms
            .get(key)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of non-empty rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
