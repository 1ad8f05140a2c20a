//! Route definitions for Accounts domain API

use axum::{routing::get, routing::post, Router};

use super::handlers::auth;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
