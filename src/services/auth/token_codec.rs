use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error::AppError;

/// Why a token failed verification.
///
/// Callers are not expected to branch on the variant: at the HTTP boundary all
/// of these collapse to "invalid". The distinction exists for logging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("signature mismatch")]
    SignatureMismatch,
}

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Outcome of a successful verification, with the subject promoted to the
/// internal user id type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: i64,
    pub issued_at: DateTime<Utc>,
}

/// HS256 access-token issuer/verifier.
///
/// Stateless: validity is re-derived from signature + expiry on every call.
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    issuer: String,
    expiration_ms: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("expiration_ms", &self.expiration_ms)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, issuer: impl Into<String>, expiration_ms: u64) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&issuer]);
        // No leeway: a token whose expiry is at or before "now" must be invalid.
        validation.leeway = 0;

        Self {
            issuer,
            expiration_ms,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn expiration_ms(&self) -> u64 {
        self.expiration_ms
    }

    /// Issue a token for `user_id`, valid from now for the configured window.
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token with an explicit issue time.
    ///
    /// JWT timestamps are whole seconds, so `issued_at` is truncated to
    /// second precision in the embedded claims.
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let iat = issued_at.timestamp();
        let exp = (issued_at + Duration::milliseconds(self.expiration_ms as i64)).timestamp();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            iat,
            exp,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign token");
                AppError::Internal
            },
        )
    }

    /// Verify signature, issuer and expiry, then extract the subject.
    ///
    /// Invalidity is a normal return value, never a panic or transport error.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                _ => TokenError::Malformed,
            })?;

        let user_id: i64 = data
            .claims
            .sub
            .parse()
            .map_err(|_| TokenError::Malformed)?;

        let issued_at = DateTime::from_timestamp(data.claims.iat, 0).ok_or(TokenError::Malformed)?;

        Ok(VerifiedToken { user_id, issued_at })
    }

    /// Convenience wrapper: an empty or malformed token is simply invalid.
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-token-codec-minimum-32-chars";
    const ONE_DAY_MS: u64 = 86_400_000;

    fn codec(expiration_ms: u64) -> TokenCodec {
        TokenCodec::new(TEST_SECRET, "forum-api", expiration_ms)
    }

    #[test]
    fn issue_then_verify_round_trips_subject_and_issue_time() {
        let codec = codec(ONE_DAY_MS);
        let issued_at = Utc::now();

        let token = codec.issue_at(42, issued_at).unwrap();
        let verified = codec.verify(&token).unwrap();

        assert_eq!(verified.user_id, 42);
        // claims carry second precision
        assert_eq!(verified.issued_at.timestamp(), issued_at.timestamp());
    }

    #[test]
    fn token_signed_with_different_secret_is_invalid() {
        let codec = codec(ONE_DAY_MS);
        let other = TokenCodec::new(
            "another-secret-key-for-token-codec-minimum-32",
            "forum-api",
            ONE_DAY_MS,
        );

        let token = other.issue(42).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::SignatureMismatch));
        assert!(!codec.is_valid(&token));
    }

    #[test]
    fn token_with_unexpected_issuer_is_invalid() {
        let codec = codec(ONE_DAY_MS);
        let other = TokenCodec::new(TEST_SECRET, "someone-else", ONE_DAY_MS);

        let token = other.issue(42).unwrap();

        assert!(!codec.is_valid(&token));
    }

    #[test]
    fn expired_token_is_invalid_even_with_valid_signature() {
        let codec = codec(1_000);

        // Backdate the issue time so the 1s window has already passed.
        let token = codec.issue_at(42, Utc::now() - Duration::seconds(5)).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
        assert!(!codec.is_valid(&token));
    }

    #[test]
    fn short_lived_token_expires_after_its_window() {
        let codec = codec(1_000);

        let token = codec.issue(42).unwrap();
        assert!(codec.is_valid(&token));

        std::thread::sleep(std::time::Duration::from_millis(2_100));
        assert!(!codec.is_valid(&token));
    }

    #[test]
    fn garbage_input_is_invalid_not_a_fault() {
        let codec = codec(ONE_DAY_MS);

        assert!(!codec.is_valid(""));
        assert!(!codec.is_valid("not-bearer-format"));
        assert!(!codec.is_valid("aaa.bbb.ccc"));
    }

    #[test]
    fn non_numeric_subject_is_malformed() {
        let codec = codec(ONE_DAY_MS);

        // Forge a structurally valid token whose sub is not a user id.
        let claims = Claims {
            iss: "forum-api".to_string(),
            sub: "not-a-number".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Malformed));
    }
}
