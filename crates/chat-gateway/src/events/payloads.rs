//! Outbound event payloads

use super::EventType;
use chat_core::{ConnectionId, UserList};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `userConnected` and `userDisconnected`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    /// Absent when a connection closes without ever naming itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub user_id: ConnectionId,
}

/// Payload of `userList`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListPayload {
    pub users: UserList,
}

/// Payload of `message` and `privateMessage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    /// Relayed verbatim from the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Sender's display name, absent if the sender never named itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Event sent from the gateway to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    UserConnected(PresencePayload),
    UserDisconnected(PresencePayload),
    UserList(UserListPayload),
    Message(ChatPayload),
    PrivateMessage(ChatPayload),
}

impl ServerEvent {
    /// Create a `userConnected` event
    pub fn user_connected(user_id: ConnectionId, username: impl Into<String>) -> Self {
        Self::UserConnected(PresencePayload {
            username: Some(username.into()),
            user_id,
        })
    }

    /// Create a `userDisconnected` event
    #[must_use]
    pub fn user_disconnected(user_id: ConnectionId, username: Option<String>) -> Self {
        Self::UserDisconnected(PresencePayload { username, user_id })
    }

    /// Create a `userList` event
    #[must_use]
    pub fn user_list(users: UserList) -> Self {
        Self::UserList(UserListPayload { users })
    }

    /// Create a broadcast `message` event
    #[must_use]
    pub fn message(data: Value, from: Option<String>) -> Self {
        Self::Message(ChatPayload {
            data: Some(data),
            from,
        })
    }

    /// Create a `privateMessage` event
    #[must_use]
    pub fn private_message(data: Option<Value>, from: Option<String>) -> Self {
        Self::PrivateMessage(ChatPayload { data, from })
    }

    /// Name of this event on the wire
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::UserConnected(_) => EventType::UserConnected,
            Self::UserDisconnected(_) => EventType::UserDisconnected,
            Self::UserList(_) => EventType::UserList,
            Self::Message(_) => EventType::Message,
            Self::PrivateMessage(_) => EventType::PrivateMessage,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
