//! Typed path parameter helpers.

use parley_core::error::AppError;
use parley_core::types::{Identity, MessageId};

/// Parses a message ID from a path segment.
pub fn parse_message_id(s: &str) -> Result<MessageId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid message ID: {s}")))
}

/// Parses a user identity from a path segment.
pub fn parse_identity(s: &str) -> Result<Identity, AppError> {
    Identity::parse(Some(s)).ok_or_else(|| AppError::validation("User ID is required"))
}
