//! REST API layer: route handlers, DTOs, router composition, and the
//! OpenAPI document.
//!
//! Versioned resource endpoints are mounted under the configured API
//! prefix (default `/api/v1`); root and health endpoints live at `/`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::app_state::AppState;

/// OpenAPI document covering every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Vibeify API",
        description = "Async REST API with PostgreSQL persistence and a background job queue."
    ),
    paths(
        handlers::system::root_handler,
        handlers::system::health_handler,
        handlers::system::api_root_handler,
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::jobs::enqueue_job,
        handlers::jobs::get_job,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "System", description = "Service metadata and health"),
        (name = "Users", description = "User management"),
        (name = "Auth", description = "Registration and authentication"),
        (name = "Jobs", description = "Background job queue"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected
/// endpoints.
#[derive(Debug)]
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Builds the complete router: versioned API under `prefix`, system
/// routes at the root, and the API documentation endpoints.
pub fn build_router(prefix: &str) -> Router<AppState> {
    let router = Router::new()
        .nest(prefix, handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_includes_all_route_groups() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/login"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/jobs"));
    }

    #[tokio::test]
    async fn router_builds_without_route_conflicts() {
        // Axum panics at construction time on conflicting routes; a
        // lazy pool is enough to exercise that.
        let config = match crate::config::AppConfig::from_lookup(|_| None) {
            Ok(c) => c,
            Err(e) => panic!("defaults should load: {e}"),
        };
        let pool = match crate::persistence::postgres::connect(&config) {
            Ok(p) => p,
            Err(e) => panic!("lazy pool should build: {e}"),
        };
        let state = crate::app_state::AppState::new(std::sync::Arc::new(config), pool);
        let _router: axum::Router = build_router("/api/v1").with_state(state);
    }
}
