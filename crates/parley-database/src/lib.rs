//! # parley-database
//!
//! PostgreSQL connection management plus the two persistence collaborators
//! the chat core relies on: a [`MessageStore`] and a [`UserDirectory`].
//! Each has a PostgreSQL implementation and an in-memory one for
//! single-node development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

use parley_core::config::{DatabaseConfig, UserSeed};
use parley_core::result::AppResult;
use parley_core::types::Identity;
use parley_entity::User;

pub use connection::DatabasePool;
pub use memory::{MemoryMessageStore, MemoryUserDirectory};
pub use repositories::{PgMessageStore, PgUserDirectory};
pub use store::{MessageStore, UserDirectory};

/// The persistence backends selected at startup.
#[derive(Clone)]
pub struct Stores {
    /// Message persistence.
    pub messages: Arc<dyn MessageStore>,
    /// User lookups.
    pub users: Arc<dyn UserDirectory>,
    /// Underlying pool, when PostgreSQL is in use.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.messages.backend())
            .finish()
    }
}

impl Stores {
    /// In-memory stores with no users.
    pub fn in_memory() -> Self {
        Self {
            messages: Arc::new(MemoryMessageStore::new()),
            users: Arc::new(MemoryUserDirectory::new()),
            pool: None,
        }
    }

    /// Connect to PostgreSQL and run migrations, or fall back to memory when
    /// no database URL is configured.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if !config.is_configured() {
            info!("No database URL configured, using in-memory stores");
            return Ok(Self::in_memory());
        }

        let pool = DatabasePool::connect(config).await?;
        migration::run_migrations(pool.pool()).await?;

        Ok(Self {
            messages: Arc::new(PgMessageStore::new(pool.pool().clone())),
            users: Arc::new(PgUserDirectory::new(pool.pool().clone())),
            pool: Some(pool),
        })
    }

    /// Create or refresh the configured users. Returns how many were written.
    pub async fn seed_users(&self, seeds: &[UserSeed]) -> AppResult<usize> {
        let mut written = 0;
        for seed in seeds {
            let Some(id) = Identity::parse(Some(seed.id.as_str())) else {
                warn!(email = %seed.email, "Skipping user seed without an id");
                continue;
            };
            let mut user = User::new(id, &seed.full_name, &seed.email);
            user.profile_pic = seed.profile_pic.clone();
            self.users.upsert(user).await?;
            written += 1;
        }

        info!(users = written, "User directory provisioned");
        Ok(written)
    }
}
