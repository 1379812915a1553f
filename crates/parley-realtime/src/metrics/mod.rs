//! Realtime engine metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level metrics counters.
#[derive(Debug, Default)]
pub struct RealtimeMetrics {
    connections_total: AtomicU64,
    connections_active: AtomicU64,
    presence_broadcasts: AtomicU64,
    messages_delivered: AtomicU64,
    messages_offline: AtomicU64,
    messages_dropped: AtomicU64,
}

impl RealtimeMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection
    pub fn record_connect(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a disconnection
    pub fn record_disconnect(&self) {
        self.connections_active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record one online-set broadcast
    pub fn record_broadcast(&self) {
        self.presence_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message pushed to a live connection
    pub fn record_delivered(&self) {
        self.messages_delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message whose recipient was offline
    pub fn record_offline(&self) {
        self.messages_offline.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a push that the recipient's connection did not accept
    pub fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            presence_broadcasts: self.presence_broadcasts.load(Ordering::Relaxed),
            messages_delivered: self.messages_delivered.load(Ordering::Relaxed),
            messages_offline: self.messages_offline.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total connections ever established
    pub connections_total: u64,
    /// Currently active connections
    pub connections_active: u64,
    /// Online-set broadcasts performed
    pub presence_broadcasts: u64,
    /// Messages pushed to an online recipient
    pub messages_delivered: u64,
    /// Messages left for pull-based retrieval
    pub messages_offline: u64,
    /// Pushes dropped by a stale or saturated connection
    pub messages_dropped: u64,
}
