//! Client-supplied user identity.
//!
//! An [`Identity`] is an opaque, non-empty string. The server never mints
//! one; it arrives in the WebSocket handshake or a trusted request header
//! and is used as-is for presence and routing.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier naming a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Identity(String);

impl Identity {
    /// Parse an optional raw value. Absent or empty input yields `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(value) if !value.is_empty() => Some(Self(value.to_string())),
            _ => None,
        }
    }

    /// Borrow the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identity, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}
