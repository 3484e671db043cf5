/*!
 * Request authentication / authorization middleware
 *
 * Responsibility:
 * - access: Bearer トークン検証 → AuthCtx を extensions に入れる（拒否はしない）
 * - guard: AccessPolicy を引いて、認証必須ルートで identity 不在なら 401
 *
 * The two stages are separate on purpose: authentication never terminates a
 * request; rejection happens only at the policy check.
 */
use axum::{Router, middleware};

use crate::state::AppState;

pub mod access;
pub mod guard;

/// Wire both stages onto a router, authenticator first.
///
/// Layers wrap outward, so `guard` is added before `access` to keep the
/// authenticator outermost on the request path.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::authorize,
        ))
        .layer(middleware::from_fn_with_state(state, access::authenticate))
}
