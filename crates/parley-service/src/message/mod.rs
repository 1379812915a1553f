//! Chat message use cases.

pub mod service;

pub use service::{MessageService, SendMessage};
