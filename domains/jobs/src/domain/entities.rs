//! Jobs domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// One job posting row from `job_offers`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    /// Create a new posting owned by `user_id`. Postings start active.
    pub fn new(
        user_id: Uuid,
        title: String,
        description: String,
        company: String,
        location: String,
        salary: Option<Decimal>,
    ) -> Self {
        let now = Utc::now();
        JobPosting {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            company,
            location,
            salary,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Posting joined with its employer's name, as read queries return it
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobWithEmployer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub employer_name: String,
}
