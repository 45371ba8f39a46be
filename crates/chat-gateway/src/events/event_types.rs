//! Event names
//!
//! Every frame on the wire carries one of these names in its `event` field.

use std::fmt;

/// Known event names, inbound and outbound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    // Client -> server
    /// Client picks a display name
    SetUsername,

    // Both directions
    /// Chat message for everyone
    Message,
    /// Chat message for one routing key
    PrivateMessage,

    // Server -> client
    /// A connection was (re)named
    UserConnected,
    /// A connection closed
    UserDisconnected,
    /// Full registry snapshot
    UserList,
}

impl EventType {
    /// Wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetUsername => "setUsername",
            Self::Message => "message",
            Self::PrivateMessage => "privateMessage",
            Self::UserConnected => "userConnected",
            Self::UserDisconnected => "userDisconnected",
            Self::UserList => "userList",
        }
    }

    /// Parse a wire name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "setUsername" => Some(Self::SetUsername),
            "message" => Some(Self::Message),
            "privateMessage" => Some(Self::PrivateMessage),
            "userConnected" => Some(Self::UserConnected),
            "userDisconnected" => Some(Self::UserDisconnected),
            "userList" => Some(Self::UserList),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
