//! Value objects - immutable types that represent domain concepts

mod connection_id;
mod display_name;

pub use connection_id::ConnectionId;
pub use display_name::{default_display_name, resolve_display_name, DisplayName, DEFAULT_NAME_PREFIX};
