//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::ConnectionManager;
use chat_common::AppConfig;
use chat_core::RelayState;
use parking_lot::Mutex;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Registry and room membership, mutated one event at a time
    relay: Arc<Mutex<RelayState>>,
    /// Outbound queues of live WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state with an empty relay
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            relay: Arc::new(Mutex::new(RelayState::new())),
            connection_manager: ConnectionManager::new_shared(),
            config: Arc::new(config),
        }
    }

    /// Get the relay state lock
    pub fn relay(&self) -> &Mutex<RelayState> {
        &self.relay
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("config", &"AppConfig")
            .finish()
    }
}
