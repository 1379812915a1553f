//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use parley_core::config::RealtimeConfig;
use parley_core::types::Identity;

use crate::connection::heartbeat::HeartbeatConfig;
use crate::connection::lifecycle::ConnectionLifecycle;
use crate::connection::pool::ConnectionPool;
use crate::connection::registry::ConnectionRegistry;
use crate::metrics::RealtimeMetrics;
use crate::presence::broadcaster::PresenceBroadcaster;
use crate::router::fanout::MessageRouter;

/// Central real-time engine shared by the HTTP and WebSocket layers.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Identity → connection mapping.
    pub registry: Arc<ConnectionRegistry>,
    /// Every open socket, identified or not.
    pub pool: Arc<ConnectionPool>,
    /// Online-set broadcaster.
    pub presence: Arc<PresenceBroadcaster>,
    /// Message fan-out.
    pub router: Arc<MessageRouter>,
    /// Open/close handling.
    pub lifecycle: Arc<ConnectionLifecycle>,
    /// Metrics collector.
    pub metrics: Arc<RealtimeMetrics>,
    /// Keepalive settings for socket tasks.
    pub heartbeat: HeartbeatConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine")
            .field("online", &self.registry.len())
            .field("connections", &self.pool.connection_count())
            .finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: &RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let metrics = Arc::new(RealtimeMetrics::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let pool = Arc::new(ConnectionPool::new());
        let presence = Arc::new(PresenceBroadcaster::new(pool.clone(), metrics.clone()));
        let router = Arc::new(MessageRouter::new(registry.clone(), metrics.clone()));
        let lifecycle = Arc::new(ConnectionLifecycle::new(
            registry.clone(),
            pool.clone(),
            presence.clone(),
            metrics.clone(),
            config.channel_buffer_size,
        ));

        info!(
            buffer = config.channel_buffer_size,
            ping_interval = config.ping_interval_seconds,
            "Real-time engine initialized"
        );

        Self {
            registry,
            pool,
            presence,
            router,
            lifecycle,
            metrics,
            heartbeat: HeartbeatConfig::from(config),
            shutdown_tx,
        }
    }

    /// Identities currently online.
    pub fn online_users(&self) -> Vec<Identity> {
        self.registry.snapshot()
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals every socket task to stop and closes all connections.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");

        let _ = self.shutdown_tx.send(());
        let closed = self.lifecycle.close_all();

        info!(closed, "Real-time engine shut down");
    }
}
