//! Access-token repository

use crate::domain::entities::AccessToken;
use jobboard_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly issued token
    pub async fn create(&self, token: &AccessToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (id, user_id, token_hash, token_hash_prefix,
                                       last_used_at, revoked_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(&token.token_hash_prefix)
        .bind(token.last_used_at)
        .bind(token.revoked_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Revoke a single token by id. Other tokens for the same user stay valid.
    pub async fn revoke(&self, token_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE access_tokens SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(token_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
