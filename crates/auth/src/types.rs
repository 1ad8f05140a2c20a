//! Auth CQRS read-model types
//!
//! Lightweight views of the same DB rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight identity for authenticated users.
///
/// Excludes the password hash; handlers needing credential data load from
/// the accounts domain repository.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Named permission group a user may hold zero or more of.
///
/// Stored as the `name` column of the `roles` table; assigned once at
/// registration (admin only at seed time) and immutable through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Candidate,
    Employer,
    Admin,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Candidate => "candidate",
            RoleName::Employer => "employer",
            RoleName::Admin => "admin",
        }
    }

    /// Roles a user may request at registration. Admin is seed-time only.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, RoleName::Candidate | RoleName::Employer)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(RoleName::Candidate),
            "employer" => Ok(RoleName::Employer),
            "admin" => Ok(RoleName::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
