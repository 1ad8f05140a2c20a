//! Bearer-token authentication for Jobboard
//!
//! Provides the `AuthBackend` (token verification + fresh per-request role
//! lookup), the `AuthContext` passed to handlers, and the `AuthUser` axum
//! extractor. Tokens are opaque, individually revocable rows in the
//! `access_tokens` table; roles are resolved from `role_user` on every
//! request, never cached.

pub mod backend;
pub mod context;
pub mod error;
pub mod extractors;
pub mod types;

pub use backend::AuthBackend;
pub use context::{is_owner_or_admin, AuthContext};
pub use error::AuthError;
pub use extractors::AuthUser;
pub use types::{AuthIdentity, RoleName};
