//! Relay state
//!
//! Owns the registry and the room membership. Mutated by a single writer
//! at a time; the gateway serializes access behind one lock.

use super::{ConnectionRegistry, RoomMembership, UserList};
use crate::value_objects::{resolve_display_name, ConnectionId, DisplayName};

/// Registry and room membership of one relay instance
#[derive(Debug, Clone, Default)]
pub struct RelayState {
    registry: ConnectionRegistry,
    rooms: RoomMembership,
}

impl RelayState {
    /// Create an empty relay state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly accepted connection
    ///
    /// The connection joins its own room but gets no registry entry.
    pub fn connect(&mut self, id: &ConnectionId) {
        self.rooms.join_own_room(id);
    }

    /// Name (or rename) a connection, returning the name it was given
    ///
    /// A missing or empty request resolves to the default name computed
    /// from the registry size before insertion.
    pub fn set_username(&mut self, id: &ConnectionId, requested: Option<&str>) -> DisplayName {
        let name = resolve_display_name(requested, self.registry.len());
        self.registry.register(id.clone(), name.clone());
        name
    }

    /// Name currently bound to `id`
    pub fn display_name(&self, id: &ConnectionId) -> Option<&str> {
        self.registry.lookup(id)
    }

    /// Forget a closed connection, returning the name it had
    pub fn disconnect(&mut self, id: &ConnectionId) -> Option<DisplayName> {
        self.rooms.leave_all(id);
        self.registry.unregister(id)
    }

    /// Snapshot of all registered names
    pub fn users(&self) -> UserList {
        self.registry.snapshot()
    }

    /// Connections joined to the routing key
    pub fn route(&self, key: &str) -> Vec<ConnectionId> {
        self.rooms.members(key)
    }

    /// Read access to the registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Read access to the room membership
    pub fn rooms(&self) -> &RoomMembership {
        &self.rooms
    }
}
