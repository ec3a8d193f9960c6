//! Auth Middleware
//!
//! Bearer token check for protected routes.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::error::AuthError;

/// Caller identity, inserted into request extensions by [`require_bearer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware that requires a valid bearer token
///
/// Rejects with 401 and `WWW-Authenticate: Bearer` before the inner
/// handler runs.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = {
        let token = extract_bearer_token(req.headers())?;
        tokens.validate(token)?
    };

    req.extensions_mut().insert(AuthenticatedUser {
        username: identity.username,
    });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::TokenMissing)
    }
}
