//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;

use parley_core::result::AppResult;
use parley_core::types::Identity;
use parley_entity::User;

use crate::store::UserDirectory;

/// User records keyed by identity.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: DashMap<Identity, User>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn exists(&self, id: &Identity) -> AppResult<bool> {
        Ok(self.users.contains_key(id))
    }

    async fn upsert(&self, user: User) -> AppResult<()> {
        self.insert(user);
        Ok(())
    }

    async fn list_except(&self, id: &Identity) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.key() != id)
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }
}
