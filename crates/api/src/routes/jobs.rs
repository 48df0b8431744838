//! Job routes for subcontractors.
//!
//! All handlers here operate under `JobScope::Owned`: a subcontractor only
//! ever sees and mutates their own jobs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    CreateJobRequest, JobResponse, JobStatus, ListJobsResponse, UpdateJobRequest,
};
use persistence::entities::JobEntity;
use persistence::repositories::{JobInput, JobQuery, JobRepository, JobScope, JobUpdateInput};
use shared::pagination::{decode_cursor, encode_cursor};
use shared::validation::validate_date_range;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Query parameters for job listings.
#[derive(Debug, Deserialize)]
pub struct ListJobsParams {
    pub status: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Builds a page response from `limit + 1` fetched rows.
pub(crate) fn page_response(mut entities: Vec<JobEntity>, limit: i64) -> ListJobsResponse {
    let has_more = entities.len() as i64 > limit;
    if has_more {
        entities.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        entities
            .last()
            .map(|e| encode_cursor(e.created_at, e.id))
    } else {
        None
    };

    ListJobsResponse {
        data: entities
            .into_iter()
            .map(|e| JobResponse::from(e.into_domain()))
            .collect(),
        next_cursor,
    }
}

/// Parses and validates common listing parameters.
pub(crate) fn listing_query(
    params: &ListJobsParams,
    scope: JobScope,
    state: &AppState,
) -> Result<JobQuery, ApiError> {
    // Status filter must name a known status.
    let status = params
        .status
        .as_deref()
        .map(|s| {
            s.parse::<JobStatus>()
                .map(|parsed| parsed.to_string())
                .map_err(ApiError::Validation)
        })
        .transpose()?;

    let cursor = params.cursor.as_deref().map(decode_cursor).transpose()?;

    let limit = params
        .limit
        .unwrap_or(state.config.limits.default_page_size)
        .clamp(1, state.config.limits.max_page_size);

    Ok(JobQuery {
        scope,
        status,
        cursor,
        limit,
    })
}

/// Create a new job.
///
/// POST /api/v1/jobs
///
/// Jobs always start in pending status.
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    request.validate()?;
    validate_date_range(request.start_date, request.end_date)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let job_repo = JobRepository::new(state.pool.clone());

    let job = job_repo
        .create_job(JobInput {
            subcontractor_id: auth.user_id,
            job_type: request.job_type,
            location: request.location,
            start_date: request.start_date,
            end_date: request.end_date,
            notes: request.notes,
            line_items: request.line_items,
        })
        .await?
        .into_domain();

    info!(
        job_id = %job.id,
        subcontractor_id = %auth.user_id,
        job_type = %job.job_type,
        "Job created"
    );

    Ok((StatusCode::CREATED, Json(job.into())))
}

/// List the caller's jobs, newest first.
///
/// GET /api/v1/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<ListJobsResponse>, ApiError> {
    let query = listing_query(&params, JobScope::Owned(auth.user_id), &state)?;
    let limit = query.limit;

    let job_repo = JobRepository::new(state.pool.clone());
    let entities = job_repo.list_jobs(query).await?;

    Ok(Json(page_response(entities, limit)))
}

/// Get one of the caller's jobs.
///
/// GET /api/v1/jobs/:job_id
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>, ApiError> {
    let job_repo = JobRepository::new(state.pool.clone());

    let job = job_repo
        .find_scoped(job_id, JobScope::Owned(auth.user_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?
        .into_domain();

    Ok(Json(job.into()))
}

/// Update one of the caller's pending jobs.
///
/// PUT /api/v1/jobs/:job_id
///
/// Returns 409 when the job has already left pending status.
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    request.validate()?;
    validate_date_range(request.start_date, request.end_date)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let job_repo = JobRepository::new(state.pool.clone());

    let updated = job_repo
        .update_pending(
            job_id,
            auth.user_id,
            JobUpdateInput {
                job_type: request.job_type,
                location: request.location,
                start_date: request.start_date,
                end_date: request.end_date,
                notes: request.notes,
                line_items: request.line_items,
            },
        )
        .await?;

    match updated {
        Some(entity) => {
            info!(job_id = %job_id, subcontractor_id = %auth.user_id, "Job updated");
            Ok(Json(JobResponse::from(entity.into_domain())))
        }
        // Distinguish a missing job from one that left pending status.
        None => {
            match job_repo
                .find_scoped(job_id, JobScope::Owned(auth.user_id))
                .await?
            {
                Some(_) => Err(ApiError::Conflict(
                    "Only pending jobs can be edited".to_string(),
                )),
                None => Err(ApiError::NotFound("Job not found".to_string())),
            }
        }
    }
}

/// Delete one of the caller's pending jobs.
///
/// DELETE /api/v1/jobs/:job_id
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let job_repo = JobRepository::new(state.pool.clone());

    let rows_affected = job_repo.delete_pending(job_id, auth.user_id).await?;

    if rows_affected == 0 {
        return match job_repo
            .find_scoped(job_id, JobScope::Owned(auth.user_id))
            .await?
        {
            Some(_) => Err(ApiError::Conflict(
                "Only pending jobs can be deleted".to_string(),
            )),
            None => Err(ApiError::NotFound("Job not found".to_string())),
        };
    }

    info!(job_id = %job_id, subcontractor_id = %auth.user_id, "Job deleted");

    Ok(StatusCode::NO_CONTENT)
}
