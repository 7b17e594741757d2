//! User service: registration, authentication, and CRUD.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{password, token};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::persistence::models::UserRow;
use crate::persistence::users::{NewUser, UserPatch, UserRepository};

/// Business logic for the user domain.
///
/// Stateless coordinator over [`UserRepository`]; every method acquires
/// pooled connections only for the duration of its queries.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
    config: Arc<AppConfig>,
}

impl UserService {
    /// Creates the service over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            repo: UserRepository::new(pool),
            config,
        }
    }

    /// Creates a user, hashing the password when one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the email or username is
    /// taken.
    pub async fn create(
        &self,
        email: String,
        username: String,
        full_name: Option<String>,
        plain_password: Option<String>,
    ) -> Result<UserRow, ApiError> {
        self.ensure_unique(&email, &username).await?;

        let hashed_password = match plain_password {
            Some(pw) => Some(password::hash_password(&pw)?),
            None => None,
        };

        let user = self
            .repo
            .insert(NewUser {
                email,
                username,
                full_name,
                hashed_password,
            })
            .await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Registers a user with mandatory credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the email or username is
    /// taken.
    pub async fn register(
        &self,
        email: String,
        username: String,
        full_name: Option<String>,
        plain_password: String,
    ) -> Result<UserRow, ApiError> {
        self.create(email, username, full_name, Some(plain_password))
            .await
    }

    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for unknown emails, missing
    /// stored credentials, or a wrong password, and
    /// [`ApiError::Forbidden`] for inactive accounts.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<String, ApiError> {
        let unauthorized = || ApiError::Unauthorized("incorrect email or password".to_string());

        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(unauthorized)?;

        let hash = user.hashed_password.as_deref().ok_or_else(unauthorized)?;
        if !password::verify_password(plain_password, hash)? {
            return Err(unauthorized());
        }

        if !user.is_active {
            return Err(ApiError::Forbidden("inactive user".to_string()));
        }

        token::create_access_token(
            user.id,
            &self.config.secret_key,
            self.config.access_token_expire_minutes,
        )
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user does not exist.
    pub async fn get(&self, id: Uuid) -> Result<UserRow, ApiError> {
        self.repo.find_by_id(id).await?.ok_or(ApiError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Lists users with the total count for pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<UserRow>, i64), ApiError> {
        self.repo.list(limit, offset).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user does not exist and
    /// [`ApiError::Conflict`] when the new email or username is taken.
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<UserRow, ApiError> {
        self.repo
            .update(id, patch)
            .await?
            .ok_or(ApiError::NotFound {
                resource: "user",
                id: id.to_string(),
            })
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if self.repo.delete(id).await? {
            tracing::info!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(ApiError::NotFound {
                resource: "user",
                id: id.to_string(),
            })
        }
    }

    /// Pre-checks uniqueness for friendlier conflict messages than the
    /// raw constraint violation. The insert still races through the
    /// unique index, which maps to the same conflict error.
    async fn ensure_unique(&self, email: &str, username: &str) -> Result<(), ApiError> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("email already registered".to_string()));
        }
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(ApiError::Conflict("username already taken".to_string()));
        }
        Ok(())
    }
}
