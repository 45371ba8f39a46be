//! Individual WebSocket connection
//!
//! Represents a single WebSocket connection and its state.

use crate::events::ServerEvent;
use chat_core::ConnectionId;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connected, no `setUsername` received yet
    Unnamed,
    /// Connected and named at least once
    Named,
    /// Closed; terminal
    Closed,
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique connection ID
    id: ConnectionId,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Channel to the socket's send task
    sender: mpsc::Sender<ServerEvent>,

    /// Last frame of any kind received from the client
    last_seen: RwLock<Instant>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: ConnectionId, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        let now = Instant::now();
        Arc::new(Self {
            id,
            state: RwLock::new(ConnectionState::Unnamed),
            sender,
            last_seen: RwLock::new(now),
            created_at: now,
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Record that the connection has been named
    ///
    /// Has no effect once the connection is closed.
    pub fn mark_named(&self) {
        let mut state = self.state.write();
        if *state != ConnectionState::Closed {
            *state = ConnectionState::Named;
        }
    }

    /// Record that the connection has closed
    pub fn mark_closed(&self) {
        *self.state.write() = ConnectionState::Closed;
    }

    /// Record inbound activity
    pub fn touch(&self) {
        *self.last_seen.write() = Instant::now();
    }

    /// Time since the client last sent anything
    pub fn idle_for(&self) -> Duration {
        self.last_seen.read().elapsed()
    }

    /// Get connection age
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Queue an event without waiting
    ///
    /// Returns `false` if the queue is full or the socket is gone; the
    /// event is dropped in that case.
    pub fn try_send(&self, event: ServerEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::debug!(
                    connection_id = %self.id,
                    event = %event.event_type(),
                    "Outbound queue full, dropping event"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::trace!(connection_id = %self.id, "Outbound queue closed");
                false
            }
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("created_at", &self.created_at)
            .finish()
    }
}
