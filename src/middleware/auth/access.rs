//! Bearer token verification → AuthCtx を extensions に入れる
//!
//! Runs once per request, before any handler. This stage never rejects:
//! - missing / empty / non-Bearer Authorization header → no token, anonymous
//! - invalid token (malformed, bad signature, expired) → anonymous
//! - token subject no longer in the principal store → anonymous
//! - principal lookup error or timeout → anonymous (with a warning)
//!
//! Whether an anonymous request may proceed is decided downstream by the
//! policy guard.

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::repos::user_repo;
use crate::state::AppState;

/// Bound on the principal lookup so a slow store degrades to anonymous
/// instead of hanging the request.
const PRINCIPAL_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match state.tokens.verify(token) {
            Ok(verified) => {
                if let Some(ctx) = resolve_principal(&state, verified.user_id).await {
                    req.extensions_mut().insert(ctx);
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "bearer token rejected, continuing anonymous");
            }
        }
    }

    next.run(req).await
}

/// Look up the token subject in the principal store.
///
/// A subject the token claims but the store no longer has is not a fault:
/// the token simply no longer authenticates anyone.
async fn resolve_principal(state: &AppState, user_id: i64) -> Option<AuthCtx> {
    let lookup = user_repo::find_by_id(&state.db, user_id);

    match tokio::time::timeout(PRINCIPAL_LOOKUP_TIMEOUT, lookup).await {
        Ok(Ok(Some(user))) => Some(AuthCtx::new(user.id, user.name, user.roles)),
        Ok(Ok(None)) => {
            tracing::debug!(user_id, "token subject no longer exists, continuing anonymous");
            None
        }
        Ok(Err(err)) => {
            tracing::warn!(user_id, error = %err, "principal lookup failed, continuing anonymous");
            None
        }
        Err(_) => {
            tracing::warn!(user_id, "principal lookup timed out, continuing anonymous");
            None
        }
    }
}

/// Extract the raw token from `Authorization: Bearer <token>`.
///
/// Absent header, a non-Bearer scheme, or an empty value all yield None.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.trim().is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_yields_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let headers = headers_with_authorization("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_scheme_yields_no_token() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn empty_or_blank_token_yields_no_token() {
        assert_eq!(bearer_token(&headers_with_authorization("Bearer ")), None);
        assert_eq!(bearer_token(&headers_with_authorization("Bearer    ")), None);
    }

    #[test]
    fn prefix_match_is_case_and_space_sensitive() {
        assert_eq!(bearer_token(&headers_with_authorization("bearer abc")), None);
        assert_eq!(bearer_token(&headers_with_authorization("Bearerabc")), None);
    }
}
