//! Connect and disconnect handlers

use crate::broadcast::Outbound;
use crate::events::ServerEvent;
use chat_core::{ConnectionId, DisplayName, RelayState};

/// Handles a newly accepted connection
pub struct ConnectHandler;

impl ConnectHandler {
    /// Join the connection to its own room; nothing is broadcast
    pub fn handle(relay: &mut RelayState, id: &ConnectionId) {
        relay.connect(id);

        tracing::debug!(connection_id = %id, "Connection joined its own room");
    }
}

/// Handles a closed connection
pub struct DisconnectHandler;

impl DisconnectHandler {
    /// Forget the connection, then announce the departure and the updated user list
    ///
    /// The closing connection's own queue may still receive the broadcasts;
    /// whether they reach the client is best-effort.
    pub fn handle(
        relay: &mut RelayState,
        outbound: &impl Outbound,
        id: &ConnectionId,
    ) -> Option<DisplayName> {
        let username = relay.disconnect(id);

        tracing::debug!(
            connection_id = %id,
            username = ?username,
            remaining = relay.registry().len(),
            rooms = relay.rooms().room_count(),
            "Connection left"
        );

        outbound.broadcast(&ServerEvent::user_disconnected(id.clone(), username.clone()));
        outbound.broadcast(&ServerEvent::user_list(relay.users()));

        username
    }
}
