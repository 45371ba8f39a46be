//! `privateMessage` handler

use crate::broadcast::Outbound;
use crate::events::ServerEvent;
use crate::protocol::PrivateMessagePayload;
use chat_core::{ConnectionId, RelayState};

/// Delivers a message to the connections joined to one routing key
pub struct PrivateMessageHandler;

impl PrivateMessageHandler {
    /// Send to every member of room `to`; an unknown or missing key reaches nobody
    ///
    /// The sender gets no acknowledgment either way.
    pub fn handle(
        relay: &RelayState,
        outbound: &impl Outbound,
        sender: &ConnectionId,
        payload: PrivateMessagePayload,
    ) -> usize {
        let Some(to) = payload.to else {
            tracing::debug!(connection_id = %sender, "Private message without recipient dropped");
            return 0;
        };

        let recipients = relay.route(&to);
        if recipients.is_empty() {
            tracing::debug!(connection_id = %sender, to = %to, "Private message to unknown room dropped");
            return 0;
        }

        let from = relay.display_name(sender).map(str::to_string);
        let event = ServerEvent::private_message(payload.message, from);

        let sent = recipients
            .iter()
            .filter(|recipient| outbound.send_to(recipient, &event))
            .count();

        tracing::debug!(connection_id = %sender, to = %to, sent = sent, "Private message relayed");

        sent
    }
}
