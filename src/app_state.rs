//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::jobs::JobDispatcher;
use crate::service::UserService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process-wide configuration.
    pub config: Arc<AppConfig>,
    /// Shared connection pool, used directly by the health check.
    pub db: PgPool,
    /// User business logic.
    pub users: UserService,
    /// Job queue client.
    pub jobs: JobDispatcher,
}

impl AppState {
    /// Wires the state from a configuration and an established pool.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, db: PgPool) -> Self {
        let users = UserService::new(db.clone(), Arc::clone(&config));
        let jobs = JobDispatcher::new(db.clone(), Arc::clone(&config));
        Self {
            config,
            db,
            users,
            jobs,
        }
    }
}
