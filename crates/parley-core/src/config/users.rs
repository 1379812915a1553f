//! Users provisioned at startup.

use serde::{Deserialize, Serialize};

/// A user to create or refresh in the user directory on boot.
///
/// Parley does not handle signup, so these are the accounts messages can be
/// addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    /// Identity the user connects with.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Profile picture URL.
    #[serde(default)]
    pub profile_pic: String,
}
