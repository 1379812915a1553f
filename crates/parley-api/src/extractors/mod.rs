//! Custom Axum extractors.

pub mod caller;
pub mod json;
pub mod path;

pub use caller::{CALLER_HEADER, Caller};
pub use json::ValidatedJson;
