//! Jobboard application composition root
//!
//! Composes all domain routers into a single application.

use axum::Router;
use jobboard_accounts::{AccountsRepositories, AccountsState};
use jobboard_applications::{ApplicationRepository, ApplicationsState};
use jobboard_auth::AuthBackend;
use jobboard_jobs::{JobRepository, JobsState};
use sqlx::PgPool;

/// Create the main application router with all routes and middleware
pub fn create_app(pool: PgPool) -> Router {
    // One auth backend shared by every domain router
    let auth = AuthBackend::new(pool.clone());

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let jobs_state = JobsState {
        jobs: JobRepository::new(pool.clone()),
        auth: auth.clone(),
    };
    let applications_state = ApplicationsState {
        applications: ApplicationRepository::new(pool),
        auth,
    };

    // Build router - compose domain routers with shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(jobboard_accounts::routes().with_state(accounts_state))
        .merge(jobboard_jobs::routes().with_state(jobs_state))
        .merge(jobboard_applications::routes().with_state(applications_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
