//! Protocol error types

use thiserror::Error;

/// Reasons an inbound frame is discarded
///
/// None of these are reported to the client; the frame is logged and dropped.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame is not a JSON object with an `event` field
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Event name is unknown or reserved for the server
    #[error("Unsupported event: {0}")]
    UnsupportedEvent(String),

    /// Binary frames carry no events
    #[error("Binary frames are not supported")]
    Binary,
}
