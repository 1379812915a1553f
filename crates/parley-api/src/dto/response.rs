//! Response DTOs.

use serde::{Deserialize, Serialize};

use parley_core::types::Identity;
use parley_realtime::MetricsSnapshot;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Users currently holding a live connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersResponse {
    /// Online identities, sorted.
    pub online: Vec<Identity>,
    /// Number of online identities.
    pub count: usize,
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Detailed health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Message store backend name.
    pub store_backend: String,
    /// Message store status.
    pub store: String,
    /// Open WebSocket connections, anonymous ones included.
    pub ws_connections: usize,
    /// Identities currently online.
    pub online_users: usize,
    /// Real-time engine counters.
    pub realtime: MetricsSnapshot,
}
