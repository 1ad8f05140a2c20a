//! Job posting API handlers
//!
//! Browsing (list, search, show) is public. Creation requires the employer
//! role; update and delete require the posting's owner or an admin.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::{is_owner_or_admin, AuthUser, RoleName};
use jobboard_common::{Error, Result, ValidatedJson};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::JobsState;
use crate::domain::entities::{JobPosting, JobWithEmployer};
use crate::repository::{JobChanges, JobSearchFilters};

/// Employer summary embedded in job responses
#[derive(Debug, Serialize)]
pub struct EmployerSummary {
    pub id: Uuid,
    pub name: String,
}

/// Job posting as exposed over the API, with its employer embedded
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub employer: EmployerSummary,
}

impl From<JobWithEmployer> for JobResponse {
    fn from(job: JobWithEmployer) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            company: job.company,
            location: job.location,
            salary: job.salary,
            is_active: job.is_active,
            created_at: job.created_at,
            updated_at: job.updated_at,
            employer: EmployerSummary {
                id: job.user_id,
                name: job.employer_name,
            },
        }
    }
}

/// Request body for POST /jobs
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub company: String,

    #[validate(length(min = 1, max = 255))]
    pub location: String,

    pub salary: Option<Decimal>,
}

/// Request body for PUT /jobs/{id}; every field is optional
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub company: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,

    pub salary: Option<Decimal>,

    pub is_active: Option<bool>,
}

/// Query parameters for GET /jobs/search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

/// GET /jobs - All active postings, newest first
pub async fn list_jobs(State(state): State<JobsState>) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.jobs.list_active().await?;

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /jobs/search - Active postings matching the supplied filters.
///
/// Absent filters are no-ops, so the result is always a subset of GET /jobs.
pub async fn search_jobs(
    State(state): State<JobsState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobResponse>>> {
    let filters = JobSearchFilters {
        title: params.title,
        company: params.company,
        location: params.location,
    };
    let jobs = state.jobs.search(&filters).await?;

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /jobs/{id} - One posting with its employer, active or not
pub async fn get_job(
    State(state): State<JobsState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>> {
    let job = state
        .jobs
        .get_with_employer(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    Ok(Json(job.into()))
}

/// POST /jobs - Create a posting owned by the calling employer
pub async fn create_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    if !ctx.has_role(RoleName::Employer) {
        return Err(Error::Authorization(
            "Only employers can create job postings".to_string(),
        ));
    }

    let job = JobPosting::new(
        ctx.user.id,
        request.title,
        request.description,
        request.company,
        request.location,
        request.salary,
    );
    let created = state.jobs.create(&job).await?;

    tracing::info!(job_id = %created.id, employer_id = %ctx.user.id, "Job posting created");

    let response = JobResponse {
        id: created.id,
        title: created.title,
        description: created.description,
        company: created.company,
        location: created.location,
        salary: created.salary,
        is_active: created.is_active,
        created_at: created.created_at,
        updated_at: created.updated_at,
        employer: EmployerSummary {
            id: ctx.user.id,
            name: ctx.user.name,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /jobs/{id} - Partial update by the posting's owner or an admin
pub async fn update_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(job_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<JobResponse>> {
    let job = state
        .jobs
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    if !is_owner_or_admin(&ctx, &[job.user_id]) {
        return Err(Error::Authorization(
            "You are not allowed to update this job posting".to_string(),
        ));
    }

    let changes = JobChanges {
        title: request.title,
        description: request.description,
        company: request.company,
        location: request.location,
        salary: request.salary,
        is_active: request.is_active,
    };
    state
        .jobs
        .update(job_id, &changes)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    // Re-read with the employer joined so the response shape matches reads
    let updated = state
        .jobs
        .get_with_employer(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// DELETE /jobs/{id} - Remove a posting; its applications cascade
pub async fn delete_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let job = state
        .jobs
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    if !is_owner_or_admin(&ctx, &[job.user_id]) {
        return Err(Error::Authorization(
            "You are not allowed to delete this job posting".to_string(),
        ));
    }

    state.jobs.delete(job_id).await?;

    tracing::info!(job_id = %job_id, user_id = %ctx.user.id, "Job posting deleted");

    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
