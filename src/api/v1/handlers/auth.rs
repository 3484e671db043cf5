/*
 * Responsibility
 * - POST /auth (login) handler
 * - DTO validation → LoginService 呼び出し → TokenResponse
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::auth::{LoginRequest, TokenResponse},
    error::AppError,
    services::auth::login::LoginError,
    state::AppState,
};

/// Exchange credentials for a bearer token.
///
/// Every credential failure maps to the same response: the client learns
/// nothing about which check failed.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let issued = state
        .login
        .login(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            LoginError::InvalidCredentials => {
                AppError::bad_request("INVALID_CREDENTIALS", "invalid email or password")
            }
            LoginError::Unavailable => AppError::Internal,
        })?;

    Ok(Json(TokenResponse {
        token: issued.token,
        token_type: issued.token_type.to_string(),
    }))
}
