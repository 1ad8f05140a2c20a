//! Role repository
//!
//! Roles are a fixed, migration-seeded set; this repository only reads them
//! and never mutates the `roles` table.

use jobboard_auth::RoleName;
use jobboard_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a role's id by name
    pub async fn find_id_by_name(&self, role: RoleName) -> Result<Uuid> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM roles WHERE name = $1")
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await?;

        id.ok_or_else(|| Error::Internal(format!("Role '{}' is not seeded", role)))
    }

    /// Role names currently held by a user, queried fresh from the join table
    pub async fn roles_of(&self, user_id: Uuid) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name
            FROM roles r
            INNER JOIN role_user ru ON r.id = ru.role_id
            WHERE ru.user_id = $1
            ORDER BY r.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
