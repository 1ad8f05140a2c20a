//! Accounts domain entities

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jobboard_common::{compute_hash_prefix, hash_secret, Error, Result};
use uuid::Uuid;

/// Full user row, including the password hash. Never serialized directly;
/// handlers map to response DTOs that exclude `password_hash`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly salted password hash
    pub fn new(name: String, email: String, password: &str) -> Self {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: hash_secret(password),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One issued bearer token. The raw token is returned to the caller exactly
/// once; only the salted hash and the deterministic lookup prefix persist.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccessToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub token_hash_prefix: String,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Issue a new token for a user, returning the row and the raw token.
    ///
    /// Token format: `jbt_` + 32 random bytes, URL-safe base64 (43 chars).
    pub fn new(user_id: Uuid) -> Result<(Self, String)> {
        let mut token_bytes = [0u8; 32];
        getrandom::getrandom(&mut token_bytes)
            .map_err(|e| Error::Internal(format!("Failed to generate random bytes: {}", e)))?;
        let raw_token = format!("jbt_{}", URL_SAFE_NO_PAD.encode(token_bytes));

        let token = AccessToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_secret(&raw_token),
            token_hash_prefix: compute_hash_prefix(&raw_token),
            last_used_at: None,
            revoked_at: None,
            created_at: Utc::now(),
        };

        Ok((token, raw_token))
    }

    /// Check if the token is still usable
    pub fn is_valid(&self) -> bool {
        self.revoked_at.is_none()
    }
}
