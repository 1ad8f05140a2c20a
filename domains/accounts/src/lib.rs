//! Accounts domain: users, roles, registration, login, access tokens

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
// Re-export repository types
pub use repository::{
    attach_role_tx, create_token_tx, create_user_tx, AccountsRepositories, RoleRepository,
    TokenRepository, UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
