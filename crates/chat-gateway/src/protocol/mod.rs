//! Gateway protocol definitions
//!
//! Every WebSocket text frame is one JSON object `{"event": <name>, "data": <payload>}`.
//! This module decodes inbound frames into typed client events.

mod client_events;
mod error;
mod frame;

pub use client_events::{ClientEvent, PrivateMessagePayload, SetUsernamePayload};
pub use error::ProtocolError;
pub use frame::InboundFrame;
