//! Client events
//!
//! Payload decoding is lenient: a payload of the wrong shape degrades to
//! its default instead of failing, so a bad `setUsername` still names the
//! connection and a bad `privateMessage` simply reaches nobody.

use super::{InboundFrame, ProtocolError};
use crate::events::EventType;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// `setUsername` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SetUsernamePayload {
    #[serde(default)]
    pub username: Option<String>,
}

impl SetUsernamePayload {
    /// Requested name, if one was given
    pub fn requested(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// `privateMessage` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrivateMessagePayload {
    /// Routing key of the recipients
    #[serde(default)]
    pub to: Option<String>,

    /// Message body, relayed verbatim
    #[serde(default)]
    pub message: Option<Value>,
}

/// Event sent by a client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    SetUsername(SetUsernamePayload),
    Message(Value),
    PrivateMessage(PrivateMessagePayload),
}

impl ClientEvent {
    /// Interpret a parsed frame
    pub fn from_frame(frame: InboundFrame) -> Result<Self, ProtocolError> {
        match EventType::from_str(&frame.event) {
            Some(EventType::SetUsername) => Ok(Self::SetUsername(lenient(frame.data))),
            Some(EventType::Message) => Ok(Self::Message(frame.data)),
            Some(EventType::PrivateMessage) => Ok(Self::PrivateMessage(lenient(frame.data))),
            _ => Err(ProtocolError::UnsupportedEvent(frame.event)),
        }
    }

    /// Parse a text frame
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Self::from_frame(InboundFrame::from_json(json)?)
    }

    /// Wire name of this event
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::SetUsername(_) => EventType::SetUsername,
            Self::Message(_) => EventType::Message,
            Self::PrivateMessage(_) => EventType::PrivateMessage,
        }
    }
}

fn lenient<T: DeserializeOwned + Default>(data: Value) -> T {
    serde_json::from_value(data).unwrap_or_default()
}
