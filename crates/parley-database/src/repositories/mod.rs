//! PostgreSQL implementations of the persistence collaborators.

pub mod message;
pub mod user;

pub use message::PgMessageStore;
pub use user::PgUserDirectory;
