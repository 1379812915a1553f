//! Presence broadcaster — announces the full online set to every peer.

use std::sync::Arc;

use tracing::debug;

use parley_core::types::Identity;

use crate::connection::handle::ConnectionHandle;
use crate::connection::pool::ConnectionPool;
use crate::message::types::OutboundEvent;
use crate::metrics::RealtimeMetrics;

/// Sends `getOnlineUsers` events.
///
/// Always the full set, never a delta. Delivery is best-effort: peers that
/// closed or whose buffer is full are skipped silently.
#[derive(Debug)]
pub struct PresenceBroadcaster {
    pool: Arc<ConnectionPool>,
    metrics: Arc<RealtimeMetrics>,
}

impl PresenceBroadcaster {
    /// Creates a broadcaster over the given connection pool.
    pub fn new(pool: Arc<ConnectionPool>, metrics: Arc<RealtimeMetrics>) -> Self {
        Self { pool, metrics }
    }

    /// Sends the online set to every connected peer.
    ///
    /// Returns the number of peers the event was enqueued for.
    pub fn announce(&self, online: Vec<Identity>) -> usize {
        let peers = self.pool.all_connections();
        let mut sent = 0usize;

        for peer in &peers {
            if peer.send(OutboundEvent::OnlineUsers(online.clone())) {
                sent += 1;
            } else {
                debug!(conn_id = %peer.id, "Skipped presence broadcast to closed peer");
            }
        }

        self.metrics.record_broadcast();
        debug!(online = online.len(), peers = peers.len(), sent, "Online set broadcast");
        sent
    }

    /// Sends the online set to a single peer.
    pub fn announce_to(&self, peer: &ConnectionHandle, online: Vec<Identity>) -> bool {
        peer.send(OutboundEvent::OnlineUsers(online))
    }
}
