//! Job queue client used by the API process.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::runner;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::persistence::JobRepository;
use crate::persistence::models::JobRow;

/// Enqueues jobs and answers status queries.
///
/// Fire-and-forget: [`JobDispatcher::enqueue`] returns as soon as the
/// row is inserted, without waiting for a worker.
#[derive(Debug, Clone)]
pub struct JobDispatcher {
    repo: JobRepository,
    config: Arc<AppConfig>,
}

impl JobDispatcher {
    /// Creates a dispatcher over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            repo: JobRepository::new(pool),
            config,
        }
    }

    /// Enqueues a job for immediate pickup and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for kinds no worker can execute
    /// and [`ApiError::Database`] on database failure.
    pub async fn enqueue(
        &self,
        kind: &str,
        payload: serde_json::Value,
    ) -> Result<Uuid, ApiError> {
        if !runner::is_known_kind(kind) {
            return Err(ApiError::invalid_field("kind", "unknown job kind"));
        }
        let id = self
            .repo
            .enqueue(kind, &payload, Utc::now(), self.config.job_max_attempts)
            .await?;
        tracing::info!(job_id = %id, kind, "job enqueued");
        Ok(id)
    }

    /// Fetches the stored state of a job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for unknown handles.
    pub async fn status(&self, id: Uuid) -> Result<JobRow, ApiError> {
        self.repo.find_by_id(id).await?.ok_or(ApiError::NotFound {
            resource: "job",
            id: id.to_string(),
        })
    }
}
