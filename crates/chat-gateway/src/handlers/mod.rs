//! Event handlers
//!
//! One handler per inbound event plus the connection lifecycle. Handlers
//! are synchronous and never fail: bad input degrades to a default or to
//! no delivery at all.

mod lifecycle;
mod message;
mod private_message;
mod set_username;

pub use lifecycle::{ConnectHandler, DisconnectHandler};
pub use message::MessageHandler;
pub use private_message::PrivateMessageHandler;
pub use set_username::SetUsernameHandler;

use crate::connection::Connection;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;

/// Dispatch incoming client events to the appropriate handler
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Apply one client event to completion
    ///
    /// The relay lock is held for the whole event, fan-out included, so
    /// every receiver observes events in the same order.
    pub fn dispatch(state: &GatewayState, connection: &Connection, event: ClientEvent) {
        let sender = connection.id();
        let outbound = state.connection_manager();
        let mut relay = state.relay().lock();

        match event {
            ClientEvent::SetUsername(payload) => {
                SetUsernameHandler::handle(&mut relay, outbound, sender, payload);
                connection.mark_named();
            }
            ClientEvent::Message(data) => {
                MessageHandler::handle(&relay, outbound, sender, data);
            }
            ClientEvent::PrivateMessage(payload) => {
                PrivateMessageHandler::handle(&relay, outbound, sender, payload);
            }
        }
    }
}
