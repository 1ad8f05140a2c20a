//! Application API handlers
//!
//! The list view is role-shaped: candidates see their own submissions,
//! employers see submissions against their postings, admins see everything.
//! A multi-role caller is resolved in priority order candidate > employer >
//! admin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::{is_owner_or_admin, AuthUser, RoleName};
use jobboard_common::{Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ApplicationsState;
use crate::domain::entities::{Application, ApplicationDetail, ApplicationStatus};

/// Candidate contact detail, shown to employers and admins
#[derive(Debug, Serialize)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Employer summary embedded in job detail
#[derive(Debug, Serialize)]
pub struct EmployerSummary {
    pub id: Uuid,
    pub name: String,
}

/// Job detail as shown to candidates and admins. `location` is included on
/// single-application reads and omitted from list rows.
#[derive(Debug, Serialize)]
pub struct JobDetailView {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub employer: EmployerSummary,
}

/// Job identification as shown to the posting's employer
#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
}

/// Candidate-facing shape: job and employer detail, no candidate block
/// (the caller is the candidate)
#[derive(Debug, Serialize)]
pub struct CandidateApplicationView {
    pub id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job: JobDetailView,
}

/// Employer-facing shape: candidate contact detail, job by id and title
#[derive(Debug, Serialize)]
pub struct EmployerApplicationView {
    pub id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate: CandidateSummary,
    pub job: JobSummary,
}

/// Admin-facing shape: full job detail plus candidate contact detail
#[derive(Debug, Serialize)]
pub struct AdminApplicationView {
    pub id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate: CandidateSummary,
    pub job: JobDetailView,
}

/// One application, shaped for whichever caller is looking at it
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApplicationView {
    Candidate(CandidateApplicationView),
    Employer(EmployerApplicationView),
    Admin(AdminApplicationView),
}

impl ApplicationView {
    pub fn for_candidate(row: ApplicationDetail, with_location: bool) -> Self {
        ApplicationView::Candidate(CandidateApplicationView {
            id: row.id,
            cover_letter: row.cover_letter,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            job: JobDetailView {
                id: row.job_id,
                title: row.job_title,
                company: row.job_company,
                location: with_location.then_some(row.job_location),
                employer: EmployerSummary {
                    id: row.employer_id,
                    name: row.employer_name,
                },
            },
        })
    }

    pub fn for_employer(row: ApplicationDetail) -> Self {
        ApplicationView::Employer(EmployerApplicationView {
            id: row.id,
            cover_letter: row.cover_letter,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            candidate: CandidateSummary {
                id: row.user_id,
                name: row.candidate_name,
                email: row.candidate_email,
            },
            job: JobSummary {
                id: row.job_id,
                title: row.job_title,
            },
        })
    }

    pub fn for_admin(row: ApplicationDetail) -> Self {
        ApplicationView::Admin(AdminApplicationView {
            id: row.id,
            cover_letter: row.cover_letter,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            candidate: CandidateSummary {
                id: row.user_id,
                name: row.candidate_name,
                email: row.candidate_email,
            },
            job: JobDetailView {
                id: row.job_id,
                title: row.job_title,
                company: row.job_company,
                location: Some(row.job_location),
                employer: EmployerSummary {
                    id: row.employer_id,
                    name: row.employer_name,
                },
            },
        })
    }
}

/// Request body for POST /jobs/{id}/apply
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(max = 1000))]
    pub cover_letter: Option<String>,
}

/// Request body for PUT /applications/{id}. An unknown status value fails
/// deserialization and surfaces as a validation error.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    pub status: ApplicationStatus,
}

/// Response for GET /applications
#[derive(Debug, Serialize)]
pub struct ListApplicationsResponse {
    pub role: RoleName,
    pub applications: Vec<ApplicationView>,
}

/// GET /applications - Role-shaped list, newest first
pub async fn list_applications(
    AuthUser(ctx): AuthUser,
    State(state): State<ApplicationsState>,
) -> Result<Json<ListApplicationsResponse>> {
    let role = ctx.primary_role().ok_or_else(|| {
        Error::Authorization("You do not have a role that can view applications".to_string())
    })?;

    let applications = match role {
        RoleName::Candidate => state
            .applications
            .list_for_candidate(ctx.user.id)
            .await?
            .into_iter()
            .map(|row| ApplicationView::for_candidate(row, false))
            .collect(),
        RoleName::Employer => state
            .applications
            .list_for_employer(ctx.user.id)
            .await?
            .into_iter()
            .map(ApplicationView::for_employer)
            .collect(),
        RoleName::Admin => state
            .applications
            .list_all()
            .await?
            .into_iter()
            .map(ApplicationView::for_admin)
            .collect(),
    };

    Ok(Json(ListApplicationsResponse { role, applications }))
}

/// POST /jobs/{id}/apply - Submit a pending application as a candidate.
///
/// The pre-insert duplicate check gives a clean 409 in the sequential case;
/// the unique constraint on (user_id, job_id) closes the concurrent race and
/// is mapped to the same 409.
pub async fn apply(
    AuthUser(ctx): AuthUser,
    State(state): State<ApplicationsState>,
    Path(job_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ApplyRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    if !ctx.has_role(RoleName::Candidate) {
        return Err(Error::Authorization(
            "Only candidates can apply to jobs".to_string(),
        ));
    }

    let job = state
        .applications
        .get_job_ref(job_id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    if !job.is_active {
        return Err(Error::BadRequest(
            "This job posting is no longer active".to_string(),
        ));
    }

    if state.applications.exists_for(ctx.user.id, job_id).await? {
        return Err(Error::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let application = Application::new(ctx.user.id, job_id, request.cover_letter);
    let created = match state.applications.create(&application).await {
        Ok(created) => created,
        Err(e) if e.is_unique_violation(Some("applications_user_job_unique")) => {
            return Err(Error::Conflict(
                "You have already applied to this job".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        application_id = %created.id,
        job_id = %job_id,
        candidate_id = %ctx.user.id,
        "Application submitted"
    );

    let detail = state
        .applications
        .get_detail(created.id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    let body = json!({
        "message": "Application submitted successfully",
        "application": ApplicationView::for_candidate(detail, true),
    });

    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /applications/{id} - One application, shaped by the caller's relation
/// to it. The owning candidate sees job detail including location; the job's
/// employer and admins see candidate contact detail.
pub async fn get_application(
    AuthUser(ctx): AuthUser,
    State(state): State<ApplicationsState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let detail = state
        .applications
        .get_detail(application_id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    let view = if ctx.user.id == detail.user_id {
        ApplicationView::for_candidate(detail, true)
    } else if ctx.user.id == detail.employer_id {
        ApplicationView::for_employer(detail)
    } else if ctx.is_admin() {
        ApplicationView::for_admin(detail)
    } else {
        return Err(Error::Authorization(
            "You are not allowed to view this application".to_string(),
        ));
    };

    Ok(Json(json!({ "application": view })))
}

/// PUT /applications/{id} - Set the status. Only the job's employer or an
/// admin may do this; the owning candidate may not.
pub async fn update_application(
    AuthUser(ctx): AuthUser,
    State(state): State<ApplicationsState>,
    Path(application_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateApplicationRequest>,
) -> Result<Json<serde_json::Value>> {
    let detail = state
        .applications
        .get_detail(application_id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    if !is_owner_or_admin(&ctx, &[detail.employer_id]) {
        return Err(Error::Authorization(
            "You are not allowed to update this application".to_string(),
        ));
    }

    state
        .applications
        .update_status(application_id, request.status)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    let updated = state
        .applications
        .get_detail(application_id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    tracing::info!(
        application_id = %application_id,
        status = %request.status,
        user_id = %ctx.user.id,
        "Application status updated"
    );

    let view = if ctx.is_admin() && ctx.user.id != updated.employer_id {
        ApplicationView::for_admin(updated)
    } else {
        ApplicationView::for_employer(updated)
    };

    let body = json!({
        "message": "Application status updated",
        "application": view,
    });

    Ok(Json(body))
}

/// DELETE /applications/{id} - Allowed for the owning candidate, the job's
/// employer, or an admin
pub async fn delete_application(
    AuthUser(ctx): AuthUser,
    State(state): State<ApplicationsState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let detail = state
        .applications
        .get_detail(application_id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    if !is_owner_or_admin(&ctx, &[detail.user_id, detail.employer_id]) {
        return Err(Error::Authorization(
            "You are not allowed to delete this application".to_string(),
        ));
    }

    state.applications.delete(application_id).await?;

    tracing::info!(application_id = %application_id, user_id = %ctx.user.id, "Application deleted");

    Ok(Json(json!({ "message": "Application deleted successfully" })))
}
