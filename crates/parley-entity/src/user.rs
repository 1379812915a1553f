//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use parley_core::types::Identity;

/// A chat participant as listed in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The identity clients connect with.
    pub id: Identity,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Profile picture URL (empty when unset).
    pub profile_pic: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user record with no profile picture.
    pub fn new(id: impl Into<Identity>, full_name: &str, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            profile_pic: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
