//! Applications domain state and auth backend integration

use crate::ApplicationRepository;
use axum::extract::FromRef;
use jobboard_auth::AuthBackend;

/// Application state for the Applications domain
#[derive(Clone)]
pub struct ApplicationsState {
    pub applications: ApplicationRepository,
    pub auth: AuthBackend,
}

impl FromRef<ApplicationsState> for AuthBackend {
    fn from_ref(state: &ApplicationsState) -> Self {
        state.auth.clone()
    }
}
