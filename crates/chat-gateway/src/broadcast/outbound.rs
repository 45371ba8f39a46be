//! Outbound delivery

use crate::events::ServerEvent;
use chat_core::ConnectionId;

/// Fire-and-forget delivery of server events
///
/// Implementations must not block: handlers call these while holding the
/// relay lock.
pub trait Outbound {
    /// Deliver to one connection, returning whether it was queued
    fn send_to(&self, id: &ConnectionId, event: &ServerEvent) -> bool;

    /// Deliver to every live connection, returning how many were queued
    fn broadcast(&self, event: &ServerEvent) -> usize;
}

/// Where a recorded event went
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Delivery {
    To(ConnectionId, ServerEvent),
    All(ServerEvent),
}

/// Outbound that records deliveries in order, for handler tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingOutbound {
    deliveries: parking_lot::Mutex<Vec<Delivery>>,
}

#[cfg(test)]
impl RecordingOutbound {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far
    pub(crate) fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock())
    }
}

#[cfg(test)]
impl Outbound for RecordingOutbound {
    fn send_to(&self, id: &ConnectionId, event: &ServerEvent) -> bool {
        self.deliveries
            .lock()
            .push(Delivery::To(id.clone(), event.clone()));
        true
    }

    fn broadcast(&self, event: &ServerEvent) -> usize {
        self.deliveries.lock().push(Delivery::All(event.clone()));
        1
    }
}
