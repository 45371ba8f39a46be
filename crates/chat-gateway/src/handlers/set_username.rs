//! `setUsername` handler

use crate::broadcast::Outbound;
use crate::events::ServerEvent;
use crate::protocol::SetUsernamePayload;
use chat_core::{ConnectionId, DisplayName, RelayState};

/// Names (or renames) the sending connection
pub struct SetUsernameHandler;

impl SetUsernameHandler {
    /// Register the name, then announce it and the updated user list to everyone
    ///
    /// `userConnected` goes out on every call, renames included.
    pub fn handle(
        relay: &mut RelayState,
        outbound: &impl Outbound,
        sender: &ConnectionId,
        payload: SetUsernamePayload,
    ) -> DisplayName {
        let renamed = relay.registry().contains(sender);
        let name = relay.set_username(sender, payload.requested());

        tracing::debug!(
            connection_id = %sender,
            username = %name,
            renamed = renamed,
            defaulted = payload.requested().map_or(true, str::is_empty),
            "Username set"
        );

        outbound.broadcast(&ServerEvent::user_connected(sender.clone(), name.clone()));
        outbound.broadcast(&ServerEvent::user_list(relay.users()));

        name
    }
}
