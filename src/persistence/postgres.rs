//! PostgreSQL pool construction and connectivity checks.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Embedded migration chain from the `migrations/` directory.
///
/// Applied explicitly via the `migrate` binary; the application never
/// runs migrations at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Builds the shared connection pool from the configuration.
///
/// Uses lazy connection establishment so the process can start before
/// the database is reachable; the health endpoint reports the actual
/// connectivity state.
///
/// # Errors
///
/// Returns a [`ApiError::Database`] if the connection URL is rejected.
pub fn connect(config: &AppConfig) -> Result<PgPool, ApiError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect_lazy(&config.database_url())?;
    Ok(pool)
}

/// Round-trips a trivial query to verify database reachability.
///
/// # Errors
///
/// Returns a [`ApiError::Database`] if the database does not answer.
pub async fn ping(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn lazy_pool_builds_without_a_live_database() {
        let config = match AppConfig::from_lookup(|_| None) {
            Ok(c) => c,
            Err(e) => panic!("defaults should load: {e}"),
        };
        assert!(connect(&config).is_ok());
    }

    #[test]
    fn migrations_come_in_reversible_pairs() {
        use sqlx::migrate::MigrationType;

        let ups = MIGRATOR
            .migrations
            .iter()
            .filter(|m| matches!(m.migration_type, MigrationType::ReversibleUp))
            .count();
        let downs = MIGRATOR
            .migrations
            .iter()
            .filter(|m| matches!(m.migration_type, MigrationType::ReversibleDown))
            .count();
        assert!(ups > 0);
        assert_eq!(ups, downs);
    }
}
