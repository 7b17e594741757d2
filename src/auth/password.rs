//! Password hashing with Argon2id.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::ApiError;

/// Hashes a plaintext password with a fresh random salt.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored hash.
///
/// A non-matching password is `Ok(false)`; only an unparsable stored
/// hash is an error.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_its_own_input() {
        let hash = match hash_password("correct horse battery staple") {
            Ok(h) => h,
            Err(e) => panic!("hashing should succeed: {e}"),
        };
        assert!(hash.starts_with("$argon2"));
        assert!(matches!(
            verify_password("correct horse battery staple", &hash),
            Ok(true)
        ));
    }

    #[test]
    fn wrong_password_is_rejected_without_error() {
        let hash = match hash_password("correct horse battery staple") {
            Ok(h) => h,
            Err(e) => panic!("hashing should succeed: {e}"),
        };
        assert!(matches!(verify_password("wrong password", &hash), Ok(false)));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let a = match hash_password("pw-eight-chars") {
            Ok(h) => h,
            Err(e) => panic!("hashing should succeed: {e}"),
        };
        let b = match hash_password("pw-eight-chars") {
            Ok(h) => h,
            Err(e) => panic!("hashing should succeed: {e}"),
        };
        assert_ne!(a, b);
    }
}
