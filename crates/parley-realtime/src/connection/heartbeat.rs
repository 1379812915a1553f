//! Ping/pong heartbeat for WebSocket keepalive.

use std::time::Duration;

use parley_core::config::RealtimeConfig;

use super::handle::ConnectionHandle;

/// Heartbeat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Interval between pings
    pub ping_interval: Duration,
    /// Extra time a peer has to answer before it is considered gone
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    /// Longest silence tolerated before the connection is closed.
    pub fn deadline(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self::from(&RealtimeConfig::default())
    }
}

impl From<&RealtimeConfig> for HeartbeatConfig {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds.max(1)),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds),
        }
    }
}

/// Whether the peer behind `handle` has stopped answering pings.
///
/// A peer that vanished without a close frame is detected here; the socket
/// task then runs the normal close path.
pub fn is_expired(handle: &ConnectionHandle, config: &HeartbeatConfig) -> bool {
    handle.since_last_pong() > config.deadline()
}
