//! User repository: SQL for the `users` table.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::UserRow;
use crate::error::ApiError;

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique email address.
    pub email: String,
    /// Unique username.
    pub username: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Pre-hashed password, if credentials were supplied.
    pub hashed_password: Option<String>,
}

/// Partial update for an existing user; `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New email address.
    pub email: Option<String>,
    /// New username.
    pub username: Option<String>,
    /// New display name (`Some(None)` is not modeled; an empty string
    /// clears it at the service layer).
    pub full_name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// PostgreSQL repository for user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a repository over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the email or username is
    /// already taken, [`ApiError::Database`] on other failures.
    pub async fn insert(&self, new_user: NewUser) -> Result<UserRow, ApiError> {
        sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, username, full_name, hashed_password) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, username, full_name, is_active, hashed_password, \
                       created_at, updated_at",
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.full_name)
        .bind(&new_user.hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::from_sqlx_unique(e, "email or username already exists"))
    }

    /// Fetches a user by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, ApiError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, full_name, is_active, hashed_password, \
                    created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Fetches a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, ApiError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, full_name, is_active, hashed_password, \
                    created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Fetches a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, ApiError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, full_name, is_active, hashed_password, \
                    created_at, updated_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Lists users ordered by creation time, newest first, along with
    /// the total row count for pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<UserRow>, i64), ApiError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, username, full_name, is_active, hashed_password, \
                    created_at, updated_at \
             FROM users ORDER BY created_at DESC, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Applies a partial update and returns the updated row, or `None`
    /// when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the new email or username is
    /// already taken, [`ApiError::Database`] on other failures.
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<UserRow>, ApiError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET \
                 email = COALESCE($2, email), \
                 username = COALESCE($3, username), \
                 full_name = COALESCE($4, full_name), \
                 is_active = COALESCE($5, is_active), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, email, username, full_name, is_active, hashed_password, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.username)
        .bind(&patch.full_name)
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::from_sqlx_unique(e, "email or username already exists"))?;
        Ok(row)
    }

    /// Deletes a user by primary key. Returns `true` when a row was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
