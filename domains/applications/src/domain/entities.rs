//! Applications domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application status. New applications start pending; updates may move the
/// status to any of the three values, there is no transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One application row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a new pending application from `user_id` against `job_id`
    pub fn new(user_id: Uuid, job_id: Uuid, cover_letter: Option<String>) -> Self {
        let now = Utc::now();
        Application {
            id: Uuid::new_v4(),
            user_id,
            job_id,
            cover_letter,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Application joined with its job, employer, and candidate, as the
/// role-shaped read queries return it
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: String,
    pub job_company: String,
    pub job_location: String,
    pub employer_id: Uuid,
    pub employer_name: String,
    pub candidate_name: String,
    pub candidate_email: String,
}
