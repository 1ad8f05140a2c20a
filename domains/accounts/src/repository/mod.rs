//! Repository implementations for Accounts domain

pub mod roles;
pub mod tokens;
pub mod transactions;
pub mod users;

use sqlx::{PgPool, Postgres, Transaction};

pub use roles::RoleRepository;
pub use tokens::TokenRepository;
pub use transactions::{attach_role_tx, create_token_tx, create_user_tx};
pub use users::UserRepository;

/// Combined repository access for the Accounts domain
#[derive(Clone)]
pub struct AccountsRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub roles: RoleRepository,
    pub tokens: TokenRepository,
}

impl AccountsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            roles: RoleRepository::new(pool.clone()),
            tokens: TokenRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
