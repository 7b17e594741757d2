//! Background worker entry point.
//!
//! Claims due jobs from the `jobs` table and executes them. Safe to run
//! in multiple instances; claiming uses row locks.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vibeify_api::config::AppConfig;
use vibeify_api::jobs::Worker;
use vibeify_api::persistence::postgres;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    let pool = postgres::connect(&config)?;

    Worker::new(pool, config).run().await;
    Ok(())
}
