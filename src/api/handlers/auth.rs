//! Authentication handlers: register, login, current user.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::error::{ApiError, ErrorResponse};

/// `POST /register` — Register a new user.
///
/// # Errors
///
/// Returns [`ApiError`] on validation failure or duplicate
/// email/username.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Auth",
    summary = "Register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Email or username already exists", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let user = state
        .users
        .register(req.email, req.username, req.full_name, req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// `POST /login` — Authenticate and receive an access token.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for bad credentials and
/// [`ApiError::Forbidden`] for inactive accounts.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    summary = "Login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Inactive user", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let token = state.users.login(&req.email, &req.password).await?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// `GET /me` — Current authenticated user.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] without a valid bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Auth",
    summary = "Current user",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(UserResponse::from(user)))
}

/// Authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
