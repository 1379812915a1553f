//! In-memory stores for single-node deployments and tests.

pub mod message;
pub mod user;

pub use message::MemoryMessageStore;
pub use user::MemoryUserDirectory;
