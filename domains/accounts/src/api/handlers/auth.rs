//! Authentication API handlers
//!
//! Implements:
//! - POST /register - Create an account with a single requested role
//! - POST /login    - Issue a new bearer token
//! - POST /logout   - Revoke the token used on this request
//! - GET  /me       - Return the authenticated identity and its role names

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use jobboard_auth::{AuthIdentity, AuthUser, RoleName};
use jobboard_common::{verify_secret_hash, Error, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{AccessToken, User};
use crate::repository::{attach_role_tx, create_token_tx, create_user_tx};

/// User profile as exposed over the API - never includes the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<AuthIdentity> for UserResponse {
    fn from(user: AuthIdentity) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request body for POST /register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(must_match(other = "password", message = "password confirmation does not match"))]
    pub password_confirmation: String,

    /// Requested role; only candidate and employer are accepted here
    pub role: String,
}

/// Request body for POST /login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response for POST /register
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
    pub role: RoleName,
}

/// Response for POST /login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
    pub roles: Vec<String>,
}

/// Response for GET /me
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub roles: Vec<String>,
}

/// POST /register - Create an account with a single requested role
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let role: RoleName = request
        .role
        .parse()
        .map_err(|_| Error::Validation("Role must be candidate or employer".to_string()))?;
    if !role.is_self_assignable() {
        return Err(Error::Validation(
            "Role must be candidate or employer".to_string(),
        ));
    }

    // Pre-check for a friendly message; the unique constraint on users.email
    // is the actual guard
    if state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(Error::Validation(
            "The email has already been taken".to_string(),
        ));
    }

    let role_id = state.repos.roles.find_id_by_name(role).await?;

    let user = User::new(request.name, request.email, &request.password);
    let (token, raw_token) = AccessToken::new(user.id)?;

    // Transaction: user + role attachment + first token, all or nothing
    let mut tx = state.repos.begin().await?;
    let created = match create_user_tx(&mut tx, &user).await {
        Ok(created) => created,
        Err(e) if e.is_unique_violation(Some("users_email_key")) => {
            return Err(Error::Validation(
                "The email has already been taken".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };
    attach_role_tx(&mut tx, created.id, role_id).await?;
    create_token_tx(&mut tx, &token).await?;
    tx.commit().await?;

    tracing::info!(user_id = %created.id, role = %role, "User registered");

    let response = RegisterResponse {
        access_token: raw_token,
        token_type: "Bearer",
        user: created.into(),
        role,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /login - Verify credentials and issue a new bearer token.
///
/// Unknown email and wrong password share one message to avoid user
/// enumeration. Issued tokens are additive; earlier tokens stay valid
/// until individually revoked.
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .filter(|user| verify_secret_hash(&request.password, &user.password_hash))
        .ok_or_else(|| Error::Validation("The provided credentials are incorrect".to_string()))?;

    let (token, raw_token) = AccessToken::new(user.id)?;
    state.repos.tokens.create(&token).await?;

    let roles = state.repos.roles.roles_of(user.id).await?;

    Ok(Json(LoginResponse {
        access_token: raw_token,
        token_type: "Bearer",
        user: user.into(),
        roles,
    }))
}

/// POST /logout - Revoke exactly the token used to authenticate this request
pub async fn logout(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<serde_json::Value>> {
    state.repos.tokens.revoke(ctx.token_id).await?;

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// GET /me - Return the authenticated identity plus its current role names
pub async fn me(AuthUser(ctx): AuthUser) -> Result<Json<MeResponse>> {
    Ok(Json(MeResponse {
        roles: ctx.role_names(),
        user: ctx.user.into(),
    }))
}
