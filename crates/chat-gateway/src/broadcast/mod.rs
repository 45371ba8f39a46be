//! Event fan-out
//!
//! The [`Outbound`] seam the event handlers deliver through.

mod outbound;

pub use outbound::Outbound;

#[cfg(test)]
pub(crate) use outbound::{Delivery, RecordingOutbound};
