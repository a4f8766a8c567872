//! User accounts: registration, password changes and credential checks.

mod crypto;
mod memory;
#[cfg(feature = "database")]
mod postgres;
mod service;

pub use crypto::{CryptoError, PasswordHasher};
pub use memory::InMemoryUserRepository;
#[cfg(feature = "database")]
pub use postgres::PostgresUserRepository;
pub use service::UserService;

use async_trait::async_trait;

use crate::error::UserError;

pub type Result<T> = std::result::Result<T, UserError>;

/// A stored account. The hash is a PHC string produced by [`PasswordHasher`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Fails with `UsernameTaken` when the name is already registered.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Fails with `UnknownUser` when no such account exists.
    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<()>;
}
