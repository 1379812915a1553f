//! Wire events pushed to WebSocket clients.

pub mod types;

pub use types::OutboundEvent;
