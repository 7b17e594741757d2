//! Scheduler loop: emits recurring jobs and purges old results.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use super::runner;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::persistence::JobRepository;

/// A recurring enqueue rule.
#[derive(Debug, Clone)]
pub struct RecurringJob {
    /// Job kind to enqueue.
    pub kind: &'static str,
    /// Payload passed to every emitted job.
    pub payload: serde_json::Value,
    /// Minimum interval between emissions.
    pub every: chrono::Duration,
}

/// The built-in recurrence table.
#[must_use]
pub fn default_schedule() -> Vec<RecurringJob> {
    vec![RecurringJob {
        kind: runner::HELLO_WORLD,
        payload: json!({}),
        every: chrono::Duration::hours(1),
    }]
}

/// Whether a recurring job is due given its last emission time.
#[must_use]
pub fn is_due(last: Option<DateTime<Utc>>, every: chrono::Duration, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(ts) => now - ts >= every,
    }
}

/// Recurring-job emitter and result janitor.
///
/// Runs as its own process. Recurrence state lives in the `jobs` table
/// itself (latest `created_at` per kind), so scheduler restarts lose
/// nothing.
#[derive(Debug)]
pub struct Scheduler {
    repo: JobRepository,
    config: Arc<AppConfig>,
    schedule: Vec<RecurringJob>,
}

impl Scheduler {
    /// Creates a scheduler with the built-in recurrence table.
    #[must_use]
    pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            repo: JobRepository::new(pool),
            config,
            schedule: default_schedule(),
        }
    }

    /// Runs the tick loop forever. Errors are logged and the loop
    /// continues.
    pub async fn run(&self) {
        let mut tick =
            tokio::time::interval(Duration::from_secs(self.config.scheduler_tick_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(
            tick_secs = self.config.scheduler_tick_secs,
            rules = self.schedule.len(),
            "scheduler started"
        );
        loop {
            tick.tick().await;
            if let Err(e) = self.tick_once().await {
                tracing::warn!(error = %e, "scheduler tick failed");
            }
        }
    }

    /// Emits due recurring jobs and purges expired results.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on database failure.
    pub async fn tick_once(&self) -> Result<(), ApiError> {
        let now = Utc::now();
        for rule in &self.schedule {
            let last = self.repo.last_enqueued_at(rule.kind).await?;
            if is_due(last, rule.every, now) {
                let id = self
                    .repo
                    .enqueue(
                        rule.kind,
                        &rule.payload,
                        now,
                        self.config.job_max_attempts,
                    )
                    .await?;
                tracing::info!(job_id = %id, kind = rule.kind, "recurring job enqueued");
            }
        }

        let cutoff = now - chrono::Duration::seconds(self.config.job_result_retention_secs);
        let purged = self.repo.purge_finished_before(cutoff).await?;
        if purged > 0 {
            tracing::info!(purged, "expired job results purged");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_emitted_rules_are_due() {
        assert!(is_due(None, chrono::Duration::hours(1), Utc::now()));
    }

    #[test]
    fn recently_emitted_rules_are_not_due() {
        let now = Utc::now();
        let last = Some(now - chrono::Duration::minutes(10));
        assert!(!is_due(last, chrono::Duration::hours(1), now));
    }

    #[test]
    fn stale_rules_are_due_again() {
        let now = Utc::now();
        let last = Some(now - chrono::Duration::hours(2));
        assert!(is_due(last, chrono::Duration::hours(1), now));
    }

    #[test]
    fn default_schedule_only_references_known_kinds() {
        for rule in default_schedule() {
            assert!(runner::is_known_kind(rule.kind));
        }
    }
}
