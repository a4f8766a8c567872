use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Result, User, UserRepository};
use crate::error::UserError;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<UserTable>,
}

#[derive(Debug, Default)]
struct UserTable {
    by_name: HashMap<String, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut table = self.users.write();
        if table.by_name.contains_key(username) {
            return Err(UserError::UsernameTaken(username.to_string()));
        }
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        table.by_name.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.read().by_name.get(username).cloned())
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<()> {
        let mut table = self.users.write();
        let user = table
            .by_name
            .get_mut(username)
            .ok_or_else(|| UserError::UnknownUser(username.to_string()))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}
