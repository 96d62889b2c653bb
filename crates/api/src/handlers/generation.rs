//! Handlers for job submission.
//!
//! Routes:
//! - `POST /image-generation` — forward an image job
//! - `POST /video-generation` — forward a video job
//!
//! Both share [`forward_job`]; only the [`WorkflowKind`] differs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use media_engine_core::jobs::{JobSubmission, WorkflowKind};

use super::JOB_SERVICE;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /image-generation
pub async fn generate_image(
    State(state): State<AppState>,
    AppJson(input): AppJson<JobSubmission>,
) -> AppResult<Response> {
    forward_job(&state, WorkflowKind::Image, &input).await
}

/// POST /video-generation
pub async fn generate_video(
    State(state): State<AppState>,
    AppJson(input): AppJson<JobSubmission>,
) -> AppResult<Response> {
    forward_job(&state, WorkflowKind::Video, &input).await
}

/// Forward `submission` to the deployment for `kind` and relay the remote's
/// status and JSON body unchanged.
async fn forward_job(
    state: &AppState,
    kind: WorkflowKind,
    submission: &JobSubmission,
) -> AppResult<Response> {
    let accepted = state.jobs.submit(kind, submission).await.map_err(|e| {
        tracing::warn!(%kind, error = %e, "Job submission failed");
        AppError::upstream(JOB_SERVICE, e)
    })?;

    let status = StatusCode::from_u16(accepted.status).unwrap_or(StatusCode::OK);
    Ok((status, Json(accepted.body)).into_response())
}
