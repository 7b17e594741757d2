//! Scheduler entry point.
//!
//! Emits recurring jobs and purges expired job results. Run exactly one
//! instance.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vibeify_api::config::AppConfig;
use vibeify_api::jobs::Scheduler;
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

    Scheduler::new(pool, config).run().await;
    Ok(())
}
