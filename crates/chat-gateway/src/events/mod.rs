//! Gateway events
//!
//! Event names and the outbound events the gateway sends to clients.

mod event_types;
mod payloads;

pub use event_types::EventType;
pub use payloads::{ChatPayload, PresencePayload, ServerEvent, UserListPayload};
