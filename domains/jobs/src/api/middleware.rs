//! Jobs domain state and auth backend integration

use crate::JobRepository;
use axum::extract::FromRef;
use jobboard_auth::AuthBackend;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub jobs: JobRepository,
    pub auth: AuthBackend,
}

impl FromRef<JobsState> for AuthBackend {
    fn from_ref(state: &JobsState) -> Self {
        state.auth.clone()
    }
}
