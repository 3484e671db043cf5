use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;
use tracing::error;

use crate::repos::user_repo::{self, UserRow};
use crate::services::auth::{password, token_codec::TokenCodec};

/// Login failure, collapsed for the caller.
///
/// Unknown email and wrong password are indistinguishable on purpose: a
/// distinct answer per field would let a client enumerate registered users.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication unavailable")]
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub token_type: &'static str,
}

/// Orchestrates credential verification and token issuance.
///
/// Stateless between calls: no lockout or backoff is kept across attempts.
#[derive(Debug, Clone)]
pub struct LoginService {
    db: PgPool,
    tokens: Arc<TokenCodec>,
}

impl LoginService {
    pub fn new(db: PgPool, tokens: Arc<TokenCodec>) -> Self {
        Self { db, tokens }
    }

    /// Check `email` / `password` against the principal store and, on match,
    /// issue a fresh bearer token for the user.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, LoginError> {
        let user = user_repo::find_by_email(&self.db, email)
            .await
            .map_err(|e| {
                error!(error = %e, "principal store lookup failed during login");
                LoginError::Unavailable
            })?;

        let user = verify_credentials(user, password)?;

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|_| LoginError::Unavailable)?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer",
        })
    }
}

/// Compare the submitted secret against the looked-up record.
///
/// A missing record and a hash mismatch produce the same error.
fn verify_credentials(user: Option<UserRow>, password: &str) -> Result<UserRow, LoginError> {
    let user = user.ok_or(LoginError::InvalidCredentials)?;

    if !password::verify(password, &user.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> UserRow {
        UserRow {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@forum.dev".to_string(),
            password_hash: password::hash(password).unwrap(),
            roles: vec!["ROLE_USER".to_string()],
        }
    }

    #[test]
    fn matching_credentials_return_the_user() {
        let user = user_with_password("123456");
        let verified = verify_credentials(Some(user), "123456").unwrap();
        assert_eq!(verified.id, 1);
    }

    #[test]
    fn unknown_email_and_wrong_password_are_indistinguishable() {
        let missing = verify_credentials(None, "123456").unwrap_err();
        let mismatch =
            verify_credentials(Some(user_with_password("123456")), "654321").unwrap_err();

        assert_eq!(missing, LoginError::InvalidCredentials);
        assert_eq!(mismatch, missing);
    }
}
