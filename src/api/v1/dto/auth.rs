/*
 * Responsibility
 * - ログインの request/response DTO
 * - validate() は形式チェックのみ (資格情報の照合は service 側)
 */
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.email.trim().is_empty() {
            errors.push(FieldError {
                field: "email",
                message: "email is required",
            });
        } else if !self.email.contains('@') {
            errors.push(FieldError {
                field: "email",
                message: "email must be a valid address",
            });
        }

        if self.password.is_empty() {
            errors.push(FieldError {
                field: "password",
                message: "password is required",
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_login_request_passes() {
        let req = LoginRequest {
            email: "ana@forum.dev".to_string(),
            password: "123456".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_reported_per_field() {
        let req = LoginRequest {
            email: "".to_string(),
            password: "".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let req = LoginRequest {
            email: "not-an-address".to_string(),
            password: "123456".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
