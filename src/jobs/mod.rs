//! Background job queue built on the `jobs` table.
//!
//! PostgreSQL serves as both broker and result backend. The API process
//! only ever enqueues through [`JobDispatcher`]; a separate worker
//! process claims and executes jobs, and a scheduler process emits
//! recurring ones. A job failure never propagates past the worker.

pub mod dispatcher;
pub mod runner;
pub mod scheduler;
pub mod worker;

pub use dispatcher::JobDispatcher;
pub use scheduler::Scheduler;
pub use worker::Worker;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a job.
///
/// `pending → running → succeeded | failed`; a failed execution with
/// attempts remaining goes back to `pending` with a delayed run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued and waiting for a worker.
    Pending,
    /// Claimed by a worker and executing.
    Running,
    /// Finished successfully; result recorded.
    Succeeded,
    /// Exhausted its attempts; last error recorded.
    Failed,
}

impl JobStatus {
    /// Stored text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Parses the stored text representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "succeeded" => Some(Self::Succeeded),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Whether the job can make no further progress.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_roundtrips() {
        for status in [
            JobStatus::Pending,
            JobStatus::Running,
            JobStatus::Succeeded,
            JobStatus::Failed,
        ] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("received"), None);
    }

    #[test]
    fn only_finished_states_are_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
