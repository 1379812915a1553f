//! Request context carrying the calling user.

use serde::{Deserialize, Serialize};

use parley_core::types::Identity;

/// Context for the current request.
///
/// Built by the API layer from the caller header and passed into service
/// methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The calling user.
    pub caller: Identity,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(caller: Identity) -> Self {
        Self { caller }
    }
}
