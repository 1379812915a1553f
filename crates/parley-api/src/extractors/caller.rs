//! `Caller` extractor — reads the calling user from the `X-User-Id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use parley_core::error::AppError;
use parley_core::types::Identity;
use parley_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the caller's identity, set by the fronting gateway.
pub const CALLER_HEADER: &str = "x-user-id";

/// The calling user, available in REST handlers.
///
/// The header value is taken verbatim; only an absent or empty header is
/// rejected.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl std::ops::Deref for Caller {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok());

        let caller = Identity::parse(raw)
            .ok_or_else(|| AppError::authentication("Missing X-User-Id header"))?;

        Ok(Caller(RequestContext::new(caller)))
    }
}
