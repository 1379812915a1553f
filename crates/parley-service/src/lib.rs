//! # parley-service
//!
//! Business logic service layer for Parley. Services orchestrate the
//! message store, the user directory, and the real-time router.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod message;

pub use context::RequestContext;
pub use message::{MessageService, SendMessage};
