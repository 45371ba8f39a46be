//! Inbound frame envelope

use super::ProtocolError;
use serde::Deserialize;
use serde_json::Value;

/// Raw inbound frame before the payload is interpreted
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    /// Event name
    pub event: String,

    /// Event payload, `null` when omitted
    #[serde(default)]
    pub data: Value,
}

impl InboundFrame {
    /// Parse a text frame
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }
}
