//! REST endpoint handlers organized by resource.

pub mod auth;
pub mod jobs;
pub mod system;
pub mod users;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

/// Composes all resource routes mounted under the API prefix.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::api_root_handler))
        .merge(users::routes())
        .merge(auth::routes())
        .merge(jobs::routes())
}
