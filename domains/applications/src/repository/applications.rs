//! Application repository
//!
//! List queries are role-shaped: candidates see their own rows, employers
//! see rows against postings they own, admins see everything. All reads
//! join the job, its employer, and the candidate in one statement.
//!
//! Job rows are read here directly (id, owner, active flag only) so the
//! apply path does not depend on the jobs crate.

use jobboard_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Application, ApplicationDetail, ApplicationStatus};

/// Minimal job read model used by the apply path
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRef {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_active: bool,
}

const APPLICATION_COLUMNS: &str = r#"
    a.id, a.user_id, a.job_id, a.cover_letter, a.status, a.created_at, a.updated_at
"#;

const DETAIL_COLUMNS: &str = r#"
    a.id, a.user_id, a.job_id, a.cover_letter, a.status, a.created_at, a.updated_at,
    j.title AS job_title, j.company AS job_company, j.location AS job_location,
    e.id AS employer_id, e.name AS employer_name,
    c.name AS candidate_name, c.email AS candidate_email
"#;

const DETAIL_JOINS: &str = r#"
    FROM applications a
    INNER JOIN job_offers j ON j.id = a.job_id
    INNER JOIN users e ON e.id = j.user_id
    INNER JOIN users c ON c.id = a.user_id
"#;

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applications submitted by one candidate, newest first
    pub async fn list_for_candidate(&self, user_id: Uuid) -> Result<Vec<ApplicationDetail>> {
        let rows = sqlx::query_as::<_, ApplicationDetail>(&format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            {DETAIL_JOINS}
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Applications against postings owned by one employer, newest first
    pub async fn list_for_employer(&self, employer_id: Uuid) -> Result<Vec<ApplicationDetail>> {
        let rows = sqlx::query_as::<_, ApplicationDetail>(&format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            {DETAIL_JOINS}
            WHERE j.user_id = $1
            ORDER BY a.created_at DESC
            "#
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every application, newest first
    pub async fn list_all(&self) -> Result<Vec<ApplicationDetail>> {
        let rows = sqlx::query_as::<_, ApplicationDetail>(&format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            {DETAIL_JOINS}
            ORDER BY a.created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// One application with its job, employer, and candidate
    pub async fn get_detail(&self, id: Uuid) -> Result<Option<ApplicationDetail>> {
        let row = sqlx::query_as::<_, ApplicationDetail>(&format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            {DETAIL_JOINS}
            WHERE a.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Whether the candidate already applied to this job.
    ///
    /// Pre-check only; the unique constraint on (user_id, job_id) is the
    /// atomic guard against concurrent duplicate submissions.
    pub async fn exists_for(&self, user_id: Uuid, job_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE user_id = $1 AND job_id = $2)",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, application: &Application) -> Result<Application> {
        let created = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications AS a (
                id, user_id, job_id, cover_letter, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.id)
        .bind(application.user_id)
        .bind(application.job_id)
        .bind(application.cover_letter.as_deref())
        .bind(application.status)
        .bind(application.created_at)
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Set the status; no transition guard, any of the three values is accepted
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let updated = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications AS a
            SET status = $2, updated_at = NOW()
            WHERE a.id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an application. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Job owner and active flag for the apply path
    pub async fn get_job_ref(&self, job_id: Uuid) -> Result<Option<JobRef>> {
        let job = sqlx::query_as::<_, JobRef>(
            "SELECT id, user_id, is_active FROM job_offers WHERE id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }
}
