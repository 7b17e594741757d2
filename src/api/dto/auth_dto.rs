//! Authentication DTOs: register, login, and token responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user_dto::{finish_validation, validate_password};
use crate::error::{ApiError, FieldError};

/// Request body for `POST /register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Username (3–100 characters).
    pub username: String,
    /// Password (min 8 characters).
    pub password: String,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// Validates field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] listing every offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let as_create = super::user_dto::CreateUserRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            password: Some(self.password.clone()),
        };
        as_create.validate()
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginRequest {
    /// Validates field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] listing every offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut fields = Vec::new();
        if self.email.is_empty() {
            fields.push(FieldError {
                field: "email".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        validate_password(&self.password, &mut fields);
        finish_validation(fields)
    }
}

/// Access token response for `POST /login`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

impl TokenResponse {
    /// Wraps a signed token.
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_validates_like_create() {
        let req = RegisterRequest {
            email: "user@example.com".to_string(),
            username: "user1".to_string(),
            password: "longenough".to_string(),
            full_name: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let req = LoginRequest {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn token_response_is_bearer() {
        let token = TokenResponse::bearer("abc".to_string());
        assert_eq!(token.token_type, "bearer");
    }
}
