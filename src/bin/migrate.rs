//! Migration runner.
//!
//! Applies (or reverts) the embedded migration chain. Kept separate
//! from the server so schema changes stay an explicit operator action:
//! the API process never migrates at startup.
//!
//! Usage:
//! ```text
//! migrate           # apply all pending migrations
//! migrate run       # same
//! migrate revert    # revert everything (down to version 0)
//! migrate revert N  # revert down to version N
//! ```

use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use vibeify_api::config::AppConfig;
use vibeify_api::persistence::postgres::MIGRATOR;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = PgPool::connect(&config.database_url()).await?;

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "run".to_string());

    match command.as_str() {
        "run" => {
            MIGRATOR.run(&pool).await?;
            tracing::info!("migrations applied");
        }
        "revert" => {
            let target: i64 = match args.next() {
                Some(raw) => raw.parse()?,
                None => 0,
            };
            MIGRATOR.undo(&pool, target).await?;
            tracing::info!(target, "migrations reverted");
        }
        other => {
            anyhow::bail!("unknown command {other:?}; expected \"run\" or \"revert\"");
        }
    }

    Ok(())
}
