//! # parley-entity
//!
//! Domain entity models for Parley. Every struct in this crate represents a
//! database table row or the input used to create one. Database entities
//! derive `sqlx::FromRow`.

pub mod message;
pub mod user;

pub use message::{Message, NewMessage};
pub use user::User;
