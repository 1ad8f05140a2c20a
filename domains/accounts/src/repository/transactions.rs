//! Transaction-scoped write helpers for the Accounts domain
//!
//! Registration creates the user, attaches the single requested role, and
//! issues the first token atomically; these helpers take an open
//! transaction so the handler controls the commit boundary.

use crate::domain::entities::{AccessToken, User};
use jobboard_common::Result;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a new user row
pub async fn create_user_tx(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<User> {
    let created = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(created)
}

/// Attach a role to a user via the join table
pub async fn attach_role_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    role_id: Uuid,
) -> Result<()> {
    sqlx::query("INSERT INTO role_user (user_id, role_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Persist a freshly issued token inside a transaction
pub async fn create_token_tx(
    tx: &mut Transaction<'_, Postgres>,
    token: &AccessToken,
) -> Result<()> {
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
    .execute(&mut **tx)
    .await?;

    Ok(())
}
