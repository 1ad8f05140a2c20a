//! Route definitions for Jobs domain API

use axum::{routing::get, Router};

use super::handlers::jobs;
use super::middleware::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/search", get(jobs::search_jobs))
        .route(
            "/jobs/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
}
