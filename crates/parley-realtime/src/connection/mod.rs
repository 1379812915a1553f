//! WebSocket connection management — handles, registry, pool, lifecycle, heartbeat.

pub mod handle;
pub mod heartbeat;
pub mod lifecycle;
pub mod pool;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionState};
pub use lifecycle::ConnectionLifecycle;
pub use pool::ConnectionPool;
pub use registry::ConnectionRegistry;
