//! Job queue handlers: enqueue and status lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{EnqueueJobRequest, EnqueueJobResponse, JobStatusResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::jobs::JobStatus;

/// `POST /jobs` — Enqueue a background job.
///
/// Returns immediately with a handle; execution happens in the worker
/// process.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for unknown job kinds.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "Jobs",
    summary = "Enqueue job",
    request_body = EnqueueJobRequest,
    responses(
        (status = 202, description = "Job accepted", body = EnqueueJobResponse),
        (status = 400, description = "Unknown job kind", body = ErrorResponse),
    )
)]
pub async fn enqueue_job(
    State(state): State<AppState>,
    payload: Result<Json<EnqueueJobRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let job_id = state.jobs.enqueue(&req.kind, req.payload).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(EnqueueJobResponse {
            job_id,
            status: JobStatus::Pending,
        }),
    ))
}

/// `GET /jobs/{id}` — Job status and result.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for unknown handles.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "Jobs",
    summary = "Job status",
    params(
        ("id" = Uuid, Path, description = "Job handle"),
    ),
    responses(
        (status = 200, description = "Job status", body = JobStatusResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let job = state.jobs.status(id).await?;
    Ok(Json(JobStatusResponse::from(job)))
}

/// Job queue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(enqueue_job))
        .route("/jobs/{id}", get(get_job))
}
