/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, tokens: TokenCodec, login: LoginService, policy: AccessPolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::auth::{login::LoginService, policy::AccessPolicy, token_codec::TokenCodec};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenCodec>,
    pub login: Arc<LoginService>,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        tokens: Arc<TokenCodec>,
        login: Arc<LoginService>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            db,
            tokens,
            login,
            policy,
        }
    }
}
