use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::{error, warn};

use crate::error::AppError;

/// Hash a plaintext password into a PHC-formatted argon2id string.
pub fn hash(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal
        })?;

    Ok(hashed.to_string())
}

/// Compare a submitted plaintext against a stored PHC hash.
///
/// A stored hash that cannot be parsed counts as a mismatch: the caller must
/// see the same outcome as a wrong password, never a fault.
pub fn verify(password: &str, phc_hash: &str) -> bool {
    let parsed = match PasswordHash::new(phc_hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is not valid PHC format");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_matches() {
        let hashed = hash("123456").unwrap();
        assert!(verify("123456", &hashed));
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hashed = hash("123456").unwrap();
        assert!(!verify("654321", &hashed));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash("123456").unwrap();
        let b = hash("123456").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_stored_hash_is_a_mismatch_not_a_fault() {
        assert!(!verify("123456", "not-a-phc-string"));
        assert!(!verify("123456", ""));
    }
}
