//! User DTOs for create, update, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::common_dto::PaginationMeta;
use crate::error::{ApiError, FieldError};
use crate::persistence::models::UserRow;
use crate::persistence::users::UserPatch;

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Unique email address.
    pub email: String,
    /// Unique username (3–100 characters).
    pub username: String,
    /// Optional display name (max 200 characters).
    #[serde(default)]
    pub full_name: Option<String>,
    /// Optional initial password (min 8 characters).
    #[serde(default)]
    pub password: Option<String>,
}

impl CreateUserRequest {
    /// Validates field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] listing every offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut fields = Vec::new();
        validate_email(&self.email, &mut fields);
        validate_username(&self.username, &mut fields);
        validate_full_name(self.full_name.as_deref(), &mut fields);
        if let Some(pw) = &self.password {
            validate_password(pw, &mut fields);
        }
        finish_validation(fields)
    }
}

/// Request body for `PATCH /users/{id}`; absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
    /// New username.
    #[serde(default)]
    pub username: Option<String>,
    /// New display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// New active flag.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    /// Validates the provided fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] listing every offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut fields = Vec::new();
        if let Some(email) = &self.email {
            validate_email(email, &mut fields);
        }
        if let Some(username) = &self.username {
            validate_username(username, &mut fields);
        }
        validate_full_name(self.full_name.as_deref(), &mut fields);
        finish_validation(fields)
    }

    /// Converts into a repository patch.
    #[must_use]
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            email: self.email,
            username: self.username,
            full_name: self.full_name,
            is_active: self.is_active,
        }
    }
}

/// User representation returned by the API; never includes credentials.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// User id.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Username.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Paginated list response for `GET /users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Users on this page.
    pub data: Vec<UserResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

fn validate_email(email: &str, fields: &mut Vec<FieldError>) {
    let well_formed = email.len() <= 255
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        fields.push(FieldError {
            field: "email".to_string(),
            message: "must be a valid email address".to_string(),
        });
    }
}

fn validate_username(username: &str, fields: &mut Vec<FieldError>) {
    if username.len() < 3 || username.len() > 100 {
        fields.push(FieldError {
            field: "username".to_string(),
            message: "must be between 3 and 100 characters".to_string(),
        });
    }
}

fn validate_full_name(full_name: Option<&str>, fields: &mut Vec<FieldError>) {
    if full_name.is_some_and(|n| n.len() > 200) {
        fields.push(FieldError {
            field: "full_name".to_string(),
            message: "must be at most 200 characters".to_string(),
        });
    }
}

pub(crate) fn validate_password(password: &str, fields: &mut Vec<FieldError>) {
    if password.len() < 8 {
        fields.push(FieldError {
            field: "password".to_string(),
            message: "must be at least 8 characters".to_string(),
        });
    }
}

pub(crate) fn finish_validation(fields: Vec<FieldError>) -> Result<(), ApiError> {
    if fields.is_empty() {
        return Ok(());
    }
    let message = fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(ApiError::Validation { message, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            email: "user@example.com".to_string(),
            username: "user1".to_string(),
            full_name: Some("User One".to_string()),
            password: Some("longenough".to_string()),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn bad_email_is_rejected_with_the_field_named() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        let Err(ApiError::Validation { fields, .. }) = req.validate() else {
            panic!("bad email should fail validation");
        };
        assert!(fields.iter().any(|f| f.field == "email"));
    }

    #[test]
    fn all_offending_fields_are_reported_together() {
        let req = CreateUserRequest {
            email: "nope".to_string(),
            username: "ab".to_string(),
            full_name: None,
            password: Some("short".to_string()),
        };
        let Err(ApiError::Validation { fields, .. }) = req.validate() else {
            panic!("request should fail validation");
        };
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn update_request_only_validates_provided_fields() {
        let req = UpdateUserRequest {
            is_active: Some(false),
            ..UpdateUserRequest::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_request_rejects_bad_username() {
        let req = UpdateUserRequest {
            username: Some("ab".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(req.validate().is_err());
    }
}
