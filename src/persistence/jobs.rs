//! Job repository: SQL for the `jobs` table.
//!
//! The table doubles as broker and result backend. Workers claim due
//! rows with `FOR UPDATE SKIP LOCKED`, so concurrent workers never
//! double-claim a job.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::JobRow;
use crate::error::ApiError;

/// PostgreSQL repository for job rows.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

const JOB_COLUMNS: &str = "id, kind, payload, status, attempts, max_attempts, run_at, \
                           started_at, finished_at, result, last_error, created_at, updated_at";

impl JobRepository {
    /// Creates a repository over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a pending job and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn enqueue(
        &self,
        kind: &str,
        payload: &serde_json::Value,
        run_at: DateTime<Utc>,
        max_attempts: i32,
    ) -> Result<Uuid, ApiError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO jobs (kind, payload, status, run_at, max_attempts) \
             VALUES ($1, $2, 'pending', $3, $4) RETURNING id",
        )
        .bind(kind)
        .bind(payload)
        .bind(run_at)
        .bind(max_attempts)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Fetches a job by handle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<JobRow>, ApiError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Atomically claims up to `batch` due pending jobs, marking them
    /// running and bumping their attempt counter.
    ///
    /// `FOR UPDATE SKIP LOCKED` in the inner select makes the claim safe
    /// under concurrent workers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn claim_due(&self, batch: i64) -> Result<Vec<JobRow>, ApiError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "UPDATE jobs SET status = 'running', started_at = now(), \
                 attempts = attempts + 1, updated_at = now() \
             WHERE id IN ( \
                 SELECT id FROM jobs \
                 WHERE status = 'pending' AND run_at <= now() \
                 ORDER BY run_at \
                 LIMIT $1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(batch)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Returns jobs abandoned mid-run to the queue.
    ///
    /// A job left `running` past the cutoff means its worker died before
    /// recording an outcome. Rows with attempts left go back to
    /// `pending` for immediate re-claim; exhausted rows become `failed`.
    /// Returns the number of rows requeued.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn requeue_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, ApiError> {
        sqlx::query(
            "UPDATE jobs SET status = 'failed', last_error = 'worker died mid-run', \
                 finished_at = now(), updated_at = now() \
             WHERE status = 'running' AND started_at < $1 AND attempts >= max_attempts",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query(
            "UPDATE jobs SET status = 'pending', last_error = 'worker died mid-run', \
                 run_at = now(), updated_at = now() \
             WHERE status = 'running' AND started_at < $1 AND attempts < max_attempts",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Marks a job succeeded and stores its result payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn mark_succeeded(
        &self,
        id: Uuid,
        result: &serde_json::Value,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE jobs SET status = 'succeeded', result = $2, finished_at = now(), \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(result)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Records a failed execution. Jobs with attempts left go back to
    /// `pending` with a delayed `run_at`; exhausted jobs become `failed`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn mark_failed(
        &self,
        id: Uuid,
        error: &str,
        retry_at: Option<DateTime<Utc>>,
    ) -> Result<(), ApiError> {
        match retry_at {
            Some(run_at) => {
                sqlx::query(
                    "UPDATE jobs SET status = 'pending', last_error = $2, run_at = $3, \
                         updated_at = now() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(error)
                .bind(run_at)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(
                    "UPDATE jobs SET status = 'failed', last_error = $2, finished_at = now(), \
                         updated_at = now() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(error)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Deletes terminal jobs that finished before the cutoff. Returns
    /// the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn purge_finished_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        let result = sqlx::query(
            "DELETE FROM jobs \
             WHERE status IN ('succeeded', 'failed') AND finished_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the most recent enqueue time for a job kind, used by the
    /// scheduler to decide whether a recurring job is due.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn last_enqueued_at(
        &self,
        kind: &str,
    ) -> Result<Option<DateTime<Utc>>, ApiError> {
        let ts = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(created_at) FROM jobs WHERE kind = $1",
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;
        Ok(ts)
    }
}
