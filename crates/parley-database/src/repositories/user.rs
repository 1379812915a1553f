//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use parley_core::error::{AppError, ErrorKind};
use parley_core::result::AppResult;
use parley_core::types::Identity;
use parley_entity::User;

use crate::store::UserDirectory;

/// User lookups backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn exists(&self, id: &Identity) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check user", e))
    }

    async fn upsert(&self, user: User) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO users (id, full_name, email, profile_pic, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
             full_name = EXCLUDED.full_name, email = EXCLUDED.email, \
             profile_pic = EXCLUDED.profile_pic, updated_at = EXCLUDED.updated_at",
        )
        .bind(&user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.profile_pic)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert user", e))?;
        Ok(())
    }

    async fn list_except(&self, id: &Identity) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id <> $1 ORDER BY full_name")
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}
