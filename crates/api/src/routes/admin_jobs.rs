//! Job routes for administrators.
//!
//! Administrators operate under `JobScope::Any` and drive the job
//! lifecycle; owners are notified of status changes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::{
    JobResponse, ListJobsResponse, NotificationKind, UpdateJobStatusRequest,
};
use persistence::repositories::{JobRepository, JobScope, NotificationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::jobs::{listing_query, page_response, ListJobsParams};

/// Query parameters for admin job listings.
#[derive(Debug, Deserialize)]
pub struct AdminListJobsParams {
    pub status: Option<String>,
    pub subcontractor_id: Option<Uuid>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// List jobs across all subcontractors.
///
/// GET /api/v1/admin/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<AdminListJobsParams>,
) -> Result<Json<ListJobsResponse>, ApiError> {
    // An explicit subcontractor filter narrows the admin scope to one owner.
    let scope = match params.subcontractor_id {
        Some(id) => JobScope::Owned(id),
        None => JobScope::Any,
    };
    let common = ListJobsParams {
        status: params.status,
        cursor: params.cursor,
        limit: params.limit,
    };
    let query = listing_query(&common, scope, &state)?;
    let limit = query.limit;

    let job_repo = JobRepository::new(state.pool.clone());
    let entities = job_repo.list_jobs(query).await?;

    Ok(Json(page_response(entities, limit)))
}

/// Get any job by ID.
///
/// GET /api/v1/admin/jobs/:job_id
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>, ApiError> {
    let job_repo = JobRepository::new(state.pool.clone());

    let job = job_repo
        .find_scoped(job_id, JobScope::Any)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?
        .into_domain();

    Ok(Json(job.into()))
}

/// Set a job's status.
///
/// PUT /api/v1/admin/jobs/:job_id/status
///
/// Any of the three statuses may be set explicitly. The owning
/// subcontractor receives a notification; a failed notification write is
/// logged but does not fail the status change.
pub async fn set_job_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateJobStatusRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let job_repo = JobRepository::new(state.pool.clone());
    let notification_repo = NotificationRepository::new(state.pool.clone());

    let job = job_repo
        .set_status(job_id, &request.status.to_string())
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?
        .into_domain();

    info!(
        job_id = %job.id,
        status = %job.status,
        admin_id = %auth.user_id,
        "Job status changed"
    );

    let body = format!("Your job \"{}\" is now {}", job.job_type, job.status);
    if let Err(e) = notification_repo
        .create_notification(
            job.subcontractor_id,
            &NotificationKind::JobStatusChanged.to_string(),
            &body,
        )
        .await
    {
        warn!(job_id = %job.id, error = %e, "Failed to write job status notification");
    }

    Ok(Json(job.into()))
}
