//! `message` handler

use crate::broadcast::Outbound;
use crate::events::ServerEvent;
use chat_core::{ConnectionId, RelayState};
use serde_json::Value;

/// Relays a chat message to every connection
pub struct MessageHandler;

impl MessageHandler {
    /// Broadcast `data` to everyone, sender included
    ///
    /// `from` is left out when the sender has not named itself.
    pub fn handle(relay: &RelayState, outbound: &impl Outbound, sender: &ConnectionId, data: Value) {
        let from = relay.display_name(sender).map(str::to_string);

        let sent = outbound.broadcast(&ServerEvent::message(data, from));

        tracing::debug!(connection_id = %sender, sent = sent, "Message relayed");
    }
}
