//! Message fan-out to live connections.

pub mod fanout;

pub use fanout::{DeliveryOutcome, MessageRouter};
