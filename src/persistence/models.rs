//! Database row models for the `users` and `jobs` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique email address.
    pub email: String,
    /// Unique username.
    pub username: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Argon2 password hash; absent for accounts created without
    /// credentials.
    #[serde(skip_serializing)]
    pub hashed_password: Option<String>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-side last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A job row from the `jobs` table.
///
/// The `status` column is stored as text; [`crate::jobs::JobStatus`]
/// provides the typed view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRow {
    /// Primary key, doubles as the task handle returned to clients.
    pub id: Uuid,
    /// Job kind discriminator (e.g. `"hello_world"`).
    pub kind: String,
    /// JSONB argument payload.
    pub payload: serde_json::Value,
    /// Lifecycle state as stored (`pending`, `running`, `succeeded`,
    /// `failed`).
    pub status: String,
    /// Executions attempted so far.
    pub attempts: i32,
    /// Bound on executions before the job is marked failed.
    pub max_attempts: i32,
    /// Earliest time the job may be claimed.
    pub run_at: DateTime<Utc>,
    /// When the current/last execution started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
    /// JSONB result recorded on success.
    pub result: Option<serde_json::Value>,
    /// Error message from the most recent failed execution.
    pub last_error: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
