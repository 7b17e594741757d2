//! JWT access tokens (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Claims carried in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
}

/// Issues a signed access token for the given user.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if signing fails.
pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    expires_in_minutes: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
}

/// Decodes and validates an access token, checking signature and expiry.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for any invalid or expired token.
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_roundtrips() {
        let user_id = Uuid::new_v4();
        let token = match create_access_token(user_id, SECRET, 30) {
            Ok(t) => t,
            Err(e) => panic!("signing should succeed: {e}"),
        };
        let claims = match decode_access_token(&token, SECRET) {
            Ok(c) => c,
            Err(e) => panic!("decoding should succeed: {e}"),
        };
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = match create_access_token(Uuid::new_v4(), SECRET, 30) {
            Ok(t) => t,
            Err(e) => panic!("signing should succeed: {e}"),
        };
        assert!(decode_access_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issue a token that expired an hour ago. Default validation
        // leeway is 60 seconds, well under one hour.
        let token = match create_access_token(Uuid::new_v4(), SECRET, -60) {
            Ok(t) => t,
            Err(e) => panic!("signing should succeed: {e}"),
        };
        assert!(decode_access_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_access_token("not.a.jwt", SECRET).is_err());
    }
}
