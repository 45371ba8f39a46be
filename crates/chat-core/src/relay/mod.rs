//! Relay state
//!
//! The registry of display names and the room membership table, owned
//! together by a single [`RelayState`] that the event router mutates.

mod registry;
mod rooms;
mod state;

pub use registry::{ConnectionRegistry, UserList};
pub use rooms::RoomMembership;
pub use state::RelayState;
