//! Connection registry
//!
//! Maps connection IDs to display names. An entry exists only for
//! connections that are open and have named themselves.

use crate::value_objects::{default_display_name, ConnectionId, DisplayName};
use std::collections::{BTreeMap, HashMap};

/// Snapshot of the registry as sent to clients
///
/// Ordered so that two snapshots of an unchanged registry serialize identically.
pub type UserList = BTreeMap<ConnectionId, DisplayName>;

/// Live mapping of connection ID to display name
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    names: HashMap<ConnectionId, DisplayName>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `id`, overwriting any previous name
    ///
    /// No uniqueness is enforced; empty names are accepted.
    pub fn register(&mut self, id: ConnectionId, name: impl Into<DisplayName>) {
        self.names.insert(id, name.into());
    }

    /// Remove the entry for `id`, returning the name it had
    pub fn unregister(&mut self, id: &ConnectionId) -> Option<DisplayName> {
        self.names.remove(id)
    }

    /// Name currently bound to `id`
    pub fn lookup(&self, id: &ConnectionId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Check if `id` has a registered name
    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.names.contains_key(id)
    }

    /// Copy of the full mapping
    pub fn snapshot(&self) -> UserList {
        self.names
            .iter()
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect()
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no names are registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fallback name for the next registration
    pub fn default_name(&self) -> DisplayName {
        default_display_name(self.len())
    }
}
