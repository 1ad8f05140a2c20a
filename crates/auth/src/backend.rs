//! Concrete authentication backend
//!
//! Wraps `PgPool` and owns auth-specific SQL queries. Uses runtime
//! `sqlx::query_as` (not macros) consistent with the CQRS cross-domain
//! read pattern used by the domain crates.

use jobboard_common::{compute_hash_prefix, verify_secret_hash};
use sqlx::PgPool;
use uuid::Uuid;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::{AuthIdentity, RoleName};

/// Prefix carried by every issued access token. Tokens without it are
/// rejected before any database work.
pub const TOKEN_PREFIX: &str = "jbt_";

/// Row type for access-token lookup (includes token_hash for verification)
#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
}

/// Concrete authentication backend.
///
/// Wraps a database pool. Provides methods to verify bearer tokens and to
/// resolve a user's role set, queried fresh per request.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
}

impl AuthBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user identity by ID (CQRS read model - lightweight subset of User)
    pub(crate) async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Resolve the role names currently held by a user.
    ///
    /// Queries the `role_user` join on every call; no caching and no
    /// denormalized role field, so role changes are visible immediately.
    pub async fn roles_of(&self, user_id: Uuid) -> Result<Vec<RoleName>, AuthError> {
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
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load roles");
            AuthError::RolesLoadError
        })?;

        // Unknown role rows would indicate a corrupted seed; surface them
        names
            .iter()
            .map(|n| {
                n.parse::<RoleName>().map_err(|_| {
                    tracing::error!(user_id = %user_id, role = %n, "Unknown role name in roles table");
                    AuthError::RolesLoadError
                })
            })
            .collect()
    }

    /// Authenticate an opaque bearer token.
    ///
    /// Uses the deterministic `token_hash_prefix` for O(1) candidate lookup,
    /// then full salted-hash verification via
    /// `jobboard_common::verify_secret_hash`. Only non-revoked rows qualify.
    pub(crate) async fn authenticate(&self, candidate: &str) -> Result<AuthContext, AuthError> {
        if !candidate.starts_with(TOKEN_PREFIX) {
            return Err(AuthError::InvalidToken);
        }

        let candidate_prefix = compute_hash_prefix(candidate);

        let rows: Vec<AccessTokenRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, token_hash
            FROM access_tokens
            WHERE token_hash_prefix = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(&candidate_prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to query access tokens");
            AuthError::AuthenticationFailed
        })?;

        for row in rows {
            if verify_secret_hash(candidate, &row.token_hash) {
                // Update last_used_at (best-effort - don't fail auth on touch error)
                if let Err(e) =
                    sqlx::query("UPDATE access_tokens SET last_used_at = NOW() WHERE id = $1")
                        .bind(row.id)
                        .execute(&self.pool)
                        .await
                {
                    tracing::warn!(error = %e, token_id = %row.id, "Failed to update token last_used_at");
                }

                let user = self
                    .find_user(row.user_id)
                    .await?
                    .ok_or(AuthError::UserNotFound)?;
                let roles = self.roles_of(row.user_id).await?;

                return Ok(AuthContext::new(user, roles, row.id));
            }
        }

        Err(AuthError::InvalidToken)
    }
}
