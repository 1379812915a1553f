//! Connection pool — every open socket, identified or not.

use std::sync::Arc;

use dashmap::DashMap;

use parley_core::types::ConnectionId;

use super::handle::ConnectionHandle;

/// Thread-safe pool of all active WebSocket connections.
///
/// Presence broadcasts fan out over this pool, so sockets that connected
/// without an identity still receive them.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.remove(conn_id).map(|(_, handle)| handle)
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }
}
