//! Shared domain types: the client-supplied identity and typed identifiers.

pub mod id;
pub mod identity;

pub use id::{ConnectionId, MessageId};
pub use identity::Identity;
