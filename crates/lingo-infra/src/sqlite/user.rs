//! SQLite user repository implementation.

use lingo_core::repository::user::UserRepository;
use lingo_types::error::RepositoryError;
use lingo_types::user::User;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain User.
struct UserRow {
    id: String,
    name: String,
    role: Option<String>,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;

        Ok(User {
            id,
            name: self.name,
            role: self.role,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        sqlx::query("INSERT INTO users (id, name, role, created_at) VALUES (?, ?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.role)
            .bind(format_datetime(&user.created_at))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(user.clone())
    }

    async fn get_user(&self, user_id: &Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, Utc};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        pool
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = User {
            id: Uuid::now_v7(),
            name: "Anna".to_string(),
            role: Some("teacher".to_string()),
            created_at: Utc::now().trunc_subsecs(6),
        };

        repo.create_user(&user).await.unwrap();
        let found = repo.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_user_without_role() {
        let repo = SqliteUserRepository::new(test_pool().await);
        let user = User {
            id: Uuid::now_v7(),
            name: "Boris".to_string(),
            role: None,
            created_at: Utc::now(),
        };

        repo.create_user(&user).await.unwrap();
        let found = repo.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(found.role, None);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let repo = SqliteUserRepository::new(test_pool().await);
        assert!(repo.get_user(&Uuid::now_v7()).await.unwrap().is_none());
    }
}
