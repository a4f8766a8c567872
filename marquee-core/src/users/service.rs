use std::sync::Arc;

use tracing::{info, warn};

use super::{PasswordHasher, Result, User, UserRepository};
use crate::error::UserError;

/// Account workflows on top of a [`UserRepository`].
///
/// Argon2 runs on the blocking pool so hashing never stalls the runtime.
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UserError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self { repository, hasher }
    }

    async fn hash(&self, password: String) -> Result<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|err| UserError::Crypto(err.to_string()))?
            .map_err(UserError::from)
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || {
            hasher.verify_password(&password, &hash)
        })
        .await
        .map_err(|err| UserError::Crypto(err.to_string()))?
        .map_err(UserError::from)
    }

    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User> {
        required("username", username)?;
        required("password", password)?;
        let username = username.trim();

        if self.repository.find_by_username(username).await?.is_some() {
            return Err(UserError::UsernameTaken(username.to_string()));
        }

        let hash = self.hash(password.to_string()).await?;
        let user = self.repository.create(username, &hash).await?;
        info!(user_id = user.id, username, "account created");
        Ok(user)
    }

    pub async fn update_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<()> {
        required("username", username)?;
        required("password", new_password)?;
        let username = username.trim();

        if self.repository.find_by_username(username).await?.is_none() {
            return Err(UserError::UnknownUser(username.to_string()));
        }

        let hash = self.hash(new_password.to_string()).await?;
        self.repository.update_password_hash(username, &hash).await?;
        info!(username, "password updated");
        Ok(())
    }

    /// Check credentials. Unknown users and wrong passwords are reported
    /// identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        required("username", username)?;
        required("password", password)?;
        let username = username.trim();

        let Some(user) = self.repository.find_by_username(username).await?
        else {
            warn!(username, "login attempt for unknown user");
            return Err(UserError::InvalidCredentials);
        };

        if !self
            .verify(password.to_string(), user.password_hash.clone())
            .await?
        {
            warn!(username, "login attempt with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        info!(user_id = user.id, username, "user logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::InMemoryUserRepository;
    use crate::users::crypto::test_hasher;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(test_hasher()),
        )
    }

    #[tokio::test]
    async fn create_then_login() {
        let users = service();
        let created = users.create_account("maya", "deren").await.unwrap();
        assert_ne!(created.password_hash, "deren");

        let logged_in = users.login("maya", "deren").await.unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let users = service();
        users.create_account("maya", "deren").await.unwrap();
        assert!(matches!(
            users.create_account("maya", "other").await,
            Err(UserError::UsernameTaken(_))
        ));
    }

    #[tokio::test]
    async fn blank_fields_are_invalid_input() {
        let users = service();
        assert!(matches!(
            users.create_account("  ", "pw").await,
            Err(UserError::InvalidInput(_))
        ));
        assert!(matches!(
            users.create_account("maya", "").await,
            Err(UserError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let users = service();
        users.create_account("maya", "deren").await.unwrap();
        assert!(matches!(
            users.login("maya", "nope").await,
            Err(UserError::InvalidCredentials)
        ));
        assert!(matches!(
            users.login("ghost", "deren").await,
            Err(UserError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn update_password_replaces_credentials() {
        let users = service();
        users.create_account("maya", "deren").await.unwrap();
        users.update_password("maya", "meshes").await.unwrap();

        assert!(users.login("maya", "deren").await.is_err());
        assert!(users.login("maya", "meshes").await.is_ok());
        assert!(matches!(
            users.update_password("ghost", "x").await,
            Err(UserError::UnknownUser(_))
        ));
    }
}
