//! Connection lifecycle — open and close transitions and their presence effects.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info};

use parley_core::types::Identity;

use crate::message::types::OutboundEvent;
use crate::metrics::RealtimeMetrics;
use crate::presence::broadcaster::PresenceBroadcaster;

use super::handle::ConnectionHandle;
use super::pool::ConnectionPool;
use super::registry::ConnectionRegistry;

/// Drives registry updates and presence broadcasts for each socket.
///
/// Every registry mutation, the snapshot taken after it and the resulting
/// broadcast happen under one gate, so peers observe online sets in the
/// same order the mutations occurred.
#[derive(Debug)]
pub struct ConnectionLifecycle {
    registry: Arc<ConnectionRegistry>,
    pool: Arc<ConnectionPool>,
    broadcaster: Arc<PresenceBroadcaster>,
    metrics: Arc<RealtimeMetrics>,
    buffer_size: usize,
    presence_gate: Mutex<()>,
}

impl ConnectionLifecycle {
    /// Creates a lifecycle handler over shared engine state.
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        pool: Arc<ConnectionPool>,
        broadcaster: Arc<PresenceBroadcaster>,
        metrics: Arc<RealtimeMetrics>,
        buffer_size: usize,
    ) -> Self {
        Self {
            registry,
            pool,
            broadcaster,
            metrics,
            buffer_size,
            presence_gate: Mutex::new(()),
        }
    }

    /// Handles a new transport session.
    ///
    /// With an identity, the connection is registered (replacing any earlier
    /// one for the same identity) and the new online set is broadcast to
    /// every peer. Without one, the connection only receives the current
    /// online set and stays out of the registry.
    ///
    /// Returns the handle and the receiving end of its outbound buffer.
    pub fn open(
        &self,
        identity: Option<Identity>,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundEvent>) {
        let (handle, rx) = ConnectionHandle::channel(identity, self.buffer_size);
        handle.mark_open();
        self.pool.add(handle.clone());
        self.metrics.record_connect();

        let _gate = self.presence_gate.lock().unwrap_or_else(|e| e.into_inner());
        match &handle.identity {
            Some(identity) => {
                if let Some(replaced) = self.registry.register(identity.clone(), handle.clone()) {
                    debug!(
                        identity = %identity,
                        replaced = %replaced.id,
                        conn_id = %handle.id,
                        "Identity reconnected, newest connection wins"
                    );
                }
                info!(conn_id = %handle.id, identity = %identity, "User connected");
                self.broadcaster.announce(self.registry.snapshot());
            }
            None => {
                info!(conn_id = %handle.id, "Anonymous connection opened");
                self.broadcaster
                    .announce_to(&handle, self.registry.snapshot());
            }
        }

        (handle, rx)
    }

    /// Handles the end of a transport session.
    ///
    /// The registry entry is removed only if it still refers to this handle,
    /// so a stale close after a reconnect leaves the newer mapping in place.
    /// Returns `false` if the handle was already closed.
    pub fn close(&self, handle: &ConnectionHandle) -> bool {
        if self.pool.remove(&handle.id).is_none() {
            return false;
        }
        handle.mark_closed();
        self.metrics.record_disconnect();

        let Some(identity) = &handle.identity else {
            info!(conn_id = %handle.id, "Anonymous connection closed");
            return true;
        };

        let _gate = self.presence_gate.lock().unwrap_or_else(|e| e.into_inner());
        if self.registry.deregister_connection(identity, handle.id) {
            info!(conn_id = %handle.id, identity = %identity, "User disconnected");
            self.broadcaster.announce(self.registry.snapshot());
        } else {
            debug!(
                conn_id = %handle.id,
                identity = %identity,
                "Closed superseded connection, online set unchanged"
            );
        }
        true
    }

    /// Closes every open connection. Returns how many were closed.
    pub fn close_all(&self) -> usize {
        self.pool
            .all_connections()
            .iter()
            .filter(|handle| self.close(handle))
            .count()
    }
}
