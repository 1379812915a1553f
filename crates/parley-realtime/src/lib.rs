//! # parley-realtime
//!
//! Real-time engine for Parley. Provides:
//!
//! - A connection registry mapping each user identity to its live socket
//! - Full online-set broadcast on every presence change
//! - Fan-out of persisted messages to the recipient's live connection
//! - Connection lifecycle handling (open, close, heartbeat expiry)
//!
//! Presence state is process-local and ephemeral: every user is offline
//! until they reconnect after a restart.

pub mod connection;
pub mod message;
pub mod metrics;
pub mod presence;
pub mod router;
pub mod server;

pub use connection::heartbeat::HeartbeatConfig;
pub use connection::lifecycle::ConnectionLifecycle;
pub use connection::registry::ConnectionRegistry;
pub use connection::ConnectionHandle;
pub use message::types::OutboundEvent;
pub use metrics::{MetricsSnapshot, RealtimeMetrics};
pub use presence::broadcaster::PresenceBroadcaster;
pub use router::fanout::{DeliveryOutcome, MessageRouter};
pub use server::RealtimeEngine;
