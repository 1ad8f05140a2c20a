//! Job posting repository
//!
//! Read queries join the employer's name in a single round trip. Search
//! filters use `$n IS NULL OR col ILIKE ...` so one statement serves every
//! filter combination.

use jobboard_common::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{JobPosting, JobWithEmployer};

/// Optional case-insensitive substring filters, ANDed together
#[derive(Debug, Default, Clone)]
pub struct JobSearchFilters {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Default, Clone)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<Decimal>,
    pub is_active: Option<bool>,
}

const JOB_WITH_EMPLOYER_COLUMNS: &str = r#"
    j.id, j.user_id, j.title, j.description, j.company, j.location,
    j.salary, j.is_active, j.created_at, j.updated_at,
    u.name AS employer_name
"#;

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All active postings with their employer, newest first
    pub async fn list_active(&self) -> Result<Vec<JobWithEmployer>> {
        let jobs = sqlx::query_as::<_, JobWithEmployer>(&format!(
            r#"
            SELECT {JOB_WITH_EMPLOYER_COLUMNS}
            FROM job_offers j
            INNER JOIN users u ON u.id = j.user_id
            WHERE j.is_active = TRUE
            ORDER BY j.created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Active postings narrowed by the provided filters, newest first
    pub async fn search(&self, filters: &JobSearchFilters) -> Result<Vec<JobWithEmployer>> {
        let jobs = sqlx::query_as::<_, JobWithEmployer>(&format!(
            r#"
            SELECT {JOB_WITH_EMPLOYER_COLUMNS}
            FROM job_offers j
            INNER JOIN users u ON u.id = j.user_id
            WHERE j.is_active = TRUE
              AND ($1::TEXT IS NULL OR j.title ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR j.company ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR j.location ILIKE '%' || $3 || '%')
            ORDER BY j.created_at DESC
            "#
        ))
        .bind(filters.title.as_deref())
        .bind(filters.company.as_deref())
        .bind(filters.location.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// One posting without the employer join
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<JobPosting>> {
        let job = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id, user_id, title, description, company, location,
                   salary, is_active, created_at, updated_at
            FROM job_offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    /// One posting with its employer, regardless of active status
    pub async fn get_with_employer(&self, id: Uuid) -> Result<Option<JobWithEmployer>> {
        let job = sqlx::query_as::<_, JobWithEmployer>(&format!(
            r#"
            SELECT {JOB_WITH_EMPLOYER_COLUMNS}
            FROM job_offers j
            INNER JOIN users u ON u.id = j.user_id
            WHERE j.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn create(&self, job: &JobPosting) -> Result<JobPosting> {
        let created = sqlx::query_as::<_, JobPosting>(
            r#"
            INSERT INTO job_offers (
                id, user_id, title, description, company, location,
                salary, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, title, description, company, location,
                      salary, is_active, created_at, updated_at
            "#,
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.is_active)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update. Unsupplied fields keep their current value;
    /// a stored salary cannot be cleared back to NULL through this path.
    pub async fn update(&self, id: Uuid, changes: &JobChanges) -> Result<Option<JobPosting>> {
        let updated = sqlx::query_as::<_, JobPosting>(
            r#"
            UPDATE job_offers
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                company = COALESCE($4, company),
                location = COALESCE($5, location),
                salary = COALESCE($6, salary),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, company, location,
                      salary, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.company.as_deref())
        .bind(changes.location.as_deref())
        .bind(changes.salary)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a posting; applications referencing it cascade at the store.
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
