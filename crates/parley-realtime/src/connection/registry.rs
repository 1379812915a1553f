//! Connection registry — maps each online identity to its live connection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use parley_core::types::{ConnectionId, Identity};

use super::handle::ConnectionHandle;

/// Process-wide identity → connection mapping.
///
/// At most one handle per identity: a later registration replaces the
/// earlier one. Built once at startup and shared by reference; the
/// lifecycle handler is the only writer.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: Mutex<HashMap<Identity, Arc<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Identity, Arc<ConnectionHandle>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts or overwrites the mapping for `identity`.
    ///
    /// Returns the handle that was replaced, if any.
    pub fn register(
        &self,
        identity: Identity,
        handle: Arc<ConnectionHandle>,
    ) -> Option<Arc<ConnectionHandle>> {
        self.entries().insert(identity, handle)
    }

    /// Removes the mapping for `identity`. Absent identities are a no-op.
    pub fn deregister(&self, identity: &Identity) -> Option<Arc<ConnectionHandle>> {
        self.entries().remove(identity)
    }

    /// Removes the mapping for `identity` only if it still points at
    /// `conn_id`. Returns `true` if an entry was removed.
    pub fn deregister_connection(&self, identity: &Identity, conn_id: ConnectionId) -> bool {
        let mut entries = self.entries();
        match entries.get(identity) {
            Some(current) if current.id == conn_id => {
                entries.remove(identity);
                true
            }
            _ => false,
        }
    }

    /// Returns the live handle for `identity`, if registered.
    pub fn lookup(&self, identity: &Identity) -> Option<Arc<ConnectionHandle>> {
        self.entries().get(identity).cloned()
    }

    /// Returns every registered identity. Order is unspecified.
    pub fn snapshot(&self) -> Vec<Identity> {
        self.entries().keys().cloned().collect()
    }

    /// Whether `identity` is registered.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.entries().contains_key(identity)
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
