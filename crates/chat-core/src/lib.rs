//! # chat-core
//!
//! Domain layer for the chat relay: connection identifiers, display names,
//! the connection registry and explicit room membership.
//! This crate has zero dependencies on infrastructure (web framework, runtime, etc.).

pub mod relay;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use relay::{ConnectionRegistry, RelayState, RoomMembership, UserList};
pub use value_objects::{
    default_display_name, resolve_display_name, ConnectionId, DisplayName, DEFAULT_NAME_PREFIX,
};
