//! User CRUD handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{
    CreateUserRequest, PaginationMeta, PaginationParams, UpdateUserRequest, UserListResponse,
    UserResponse,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /users` — Create a user.
///
/// # Errors
///
/// Returns [`ApiError`] on validation failure or duplicate
/// email/username.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    summary = "Create user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Email or username already exists", body = ErrorResponse),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let user = state
        .users
        .create(req.email, req.username, req.full_name, req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// `GET /users` — List users with pagination.
///
/// # Errors
///
/// Returns [`ApiError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    summary = "List users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated user list", body = UserListResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let params = params.clamped();
    let (rows, total) = state.users.list(params.limit(), params.offset()).await?;
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    Ok(Json(UserListResponse {
        data: rows.into_iter().map(UserResponse::from).collect(),
        pagination: PaginationMeta::new(&params, total),
    }))
}

/// `GET /users/{id}` — Get a user by id.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get user by id",
    params(
        ("id" = Uuid, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// `PATCH /users/{id}` — Partially update a user.
///
/// # Errors
///
/// Returns [`ApiError`] on validation failure, missing user, or
/// duplicate email/username.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Update user",
    params(
        ("id" = Uuid, Path, description = "User id"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email or username already exists", body = ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let user = state.users.update(id, req.into_patch()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// `DELETE /users/{id}` — Delete a user.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the user does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Delete user",
    params(
        ("id" = Uuid, Path, description = "User id"),
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}
