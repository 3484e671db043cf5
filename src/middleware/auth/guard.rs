//! AccessPolicy の適用 (authorization)
//!
//! Runs after the authenticator. The only stage allowed to terminate a
//! request before business logic: a route requiring authentication with no
//! bound identity is rejected with 401.

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::policy::Access;
use crate::state::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Nested routers see a stripped path; match the policy against the
    // original one.
    match state.policy.check(req.method(), original_uri.path()) {
        Access::Public => Ok(next.run(req).await),
        Access::Authenticated => {
            if req.extensions().get::<AuthCtx>().is_some() {
                Ok(next.run(req).await)
            } else {
                Err(AppError::Unauthorized)
            }
        }
    }
}
