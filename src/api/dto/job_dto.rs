//! Job DTOs for enqueue and status operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::jobs::JobStatus;
use crate::persistence::models::JobRow;

/// Request body for `POST /jobs`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnqueueJobRequest {
    /// Job kind (e.g. `"hello_world"`).
    pub kind: String,
    /// Arbitrary JSON payload passed to the job.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Response body for `POST /jobs` (202 Accepted).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnqueueJobResponse {
    /// Handle for later status queries.
    pub job_id: Uuid,
    /// Initial status, always `pending`.
    pub status: JobStatus,
}

/// Response body for `GET /jobs/{id}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobStatusResponse {
    /// Job handle.
    pub job_id: Uuid,
    /// Job kind.
    pub kind: String,
    /// Current lifecycle state; `unknown` if the stored value does not
    /// parse.
    pub status: String,
    /// Executions attempted so far.
    pub attempts: i32,
    /// Result payload, present once succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error from the most recent failed execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Enqueue timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, present once terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for JobStatusResponse {
    fn from(row: JobRow) -> Self {
        let status = JobStatus::parse(&row.status)
            .map_or_else(|| "unknown".to_string(), |s| s.to_string());
        Self {
            job_id: row.id,
            kind: row.kind,
            status,
            attempts: row.attempts,
            result: row.result,
            error: row.last_error,
            created_at: row.created_at,
            finished_at: row.finished_at,
        }
    }
}
