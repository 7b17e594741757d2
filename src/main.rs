//! vibeify-api server entry point.
//!
//! Starts the Axum HTTP server. Schema migrations are applied
//! separately via the `migrate` binary, and background jobs run in the
//! `worker` and `scheduler` processes.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vibeify_api::api;
use vibeify_api::app_state::AppState;
use vibeify_api::config::AppConfig;
use vibeify_api::persistence::postgres;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, project = %config.project_name, "starting vibeify-api");

    let pool = postgres::connect(&config)?;
    let config = Arc::new(config);
    let state = AppState::new(Arc::clone(&config), pool);

    let app = api::build_router(&config.api_prefix)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer from the configured origin list. A single `*`
/// entry allows any origin.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
