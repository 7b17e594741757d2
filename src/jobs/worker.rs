//! Worker loop: claims due jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;

use super::runner;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::persistence::JobRepository;
use crate::persistence::models::JobRow;

/// Base delay before the first retry.
const RETRY_BASE_SECS: i64 = 30;
/// Upper bound on the retry delay.
const RETRY_CAP_SECS: i64 = 900;

/// Background job worker.
///
/// Runs as its own process; shares nothing with the API process except
/// the database. Claiming uses `FOR UPDATE SKIP LOCKED`, so any number
/// of workers can run side by side.
#[derive(Debug)]
pub struct Worker {
    repo: JobRepository,
    config: Arc<AppConfig>,
}

impl Worker {
    /// Creates a worker over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            repo: JobRepository::new(pool),
            config,
        }
    }

    /// Runs the poll loop forever.
    ///
    /// Database errors during a poll are logged and the loop continues;
    /// a worker outage must not require operator intervention once the
    /// database recovers.
    pub async fn run(&self) {
        let mut tick =
            tokio::time::interval(Duration::from_secs(self.config.worker_poll_interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(
            poll_interval_secs = self.config.worker_poll_interval_secs,
            batch = self.config.worker_batch_size,
            "worker started"
        );
        loop {
            tick.tick().await;
            if let Err(e) = self.poll_once().await {
                tracing::warn!(error = %e, "job poll failed");
            }
        }
    }

    /// Claims one batch of due jobs and executes them sequentially.
    ///
    /// Jobs abandoned by a dead worker (stuck `running` past the stale
    /// window) are returned to the queue first, so they re-enter the
    /// claim below instead of blocking forever.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] if the requeue or claim query
    /// fails. Job execution failures are recorded per job, never
    /// returned.
    pub async fn poll_once(&self) -> Result<usize, ApiError> {
        let cutoff = stale_cutoff(Utc::now(), self.config.job_stale_after_secs);
        let requeued = self.repo.requeue_stale(cutoff).await?;
        if requeued > 0 {
            tracing::warn!(requeued, "requeued jobs abandoned by a dead worker");
        }
        let claimed = self.repo.claim_due(self.config.worker_batch_size).await?;
        let count = claimed.len();
        for job in claimed {
            self.execute_one(job).await;
        }
        Ok(count)
    }

    /// Executes a single claimed job and records the outcome.
    async fn execute_one(&self, job: JobRow) {
        tracing::info!(job_id = %job.id, kind = %job.kind, attempt = job.attempts, "job started");
        match runner::execute(&job.kind, &job.payload).await {
            Ok(result) => {
                if let Err(e) = self.repo.mark_succeeded(job.id, &result).await {
                    tracing::error!(job_id = %job.id, error = %e, "failed to record job success");
                } else {
                    tracing::info!(job_id = %job.id, "job succeeded");
                }
            }
            Err(message) => {
                let retry_at = if job.attempts < job.max_attempts {
                    Some(Utc::now() + retry_backoff(job.attempts))
                } else {
                    None
                };
                tracing::warn!(
                    job_id = %job.id,
                    attempt = job.attempts,
                    will_retry = retry_at.is_some(),
                    error = %message,
                    "job failed"
                );
                if let Err(e) = self.repo.mark_failed(job.id, &message, retry_at).await {
                    tracing::error!(job_id = %job.id, error = %e, "failed to record job failure");
                }
            }
        }
    }
}

/// Instant before which a `running` job counts as abandoned.
///
/// A negative stale window would place the cutoff in the future and
/// requeue jobs that have not even started; it is clamped to zero.
#[must_use]
pub fn stale_cutoff(
    now: chrono::DateTime<Utc>,
    stale_after_secs: i64,
) -> chrono::DateTime<Utc> {
    now - chrono::Duration::seconds(stale_after_secs.max(0))
}

/// Exponential backoff for the given completed attempt count, capped.
#[must_use]
pub fn retry_backoff(attempts: i32) -> chrono::Duration {
    let exponent = attempts.saturating_sub(1).clamp(0, 16) as u32;
    let secs = RETRY_BASE_SECS
        .saturating_mul(2_i64.saturating_pow(exponent))
        .min(RETRY_CAP_SECS);
    chrono::Duration::seconds(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(retry_backoff(1).num_seconds(), 30);
        assert_eq!(retry_backoff(2).num_seconds(), 60);
        assert_eq!(retry_backoff(3).num_seconds(), 120);
    }

    #[test]
    fn backoff_is_capped() {
        assert_eq!(retry_backoff(10).num_seconds(), 900);
        assert_eq!(retry_backoff(i32::MAX).num_seconds(), 900);
    }

    #[test]
    fn backoff_tolerates_zero_attempts() {
        assert_eq!(retry_backoff(0).num_seconds(), 30);
    }

    #[test]
    fn stale_cutoff_trails_now_by_the_window() {
        let now = Utc::now();
        assert_eq!(stale_cutoff(now, 1800), now - chrono::Duration::seconds(1800));
    }

    #[test]
    fn stale_cutoff_never_lands_in_the_future() {
        let now = Utc::now();
        assert_eq!(stale_cutoff(now, -60), now);
    }
}
