//! Route definitions for Applications domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::applications;
use super::middleware::ApplicationsState;

/// Create all Applications domain API routes
pub fn routes() -> Router<ApplicationsState> {
    Router::new()
        .route("/applications", get(applications::list_applications))
        .route(
            "/applications/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route("/jobs/{id}/apply", post(applications::apply))
}
