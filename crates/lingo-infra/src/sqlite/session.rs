//! SQLite session repository implementation.
//!
//! Sessions are issued outside the chat flow (operator CLI or an external
//! auth service writing the same table); the chat flow only reads them.

use chrono::{DateTime, Utc};
use lingo_core::repository::session::SessionRepository;
use lingo_types::error::RepositoryError;
use lingo_types::session::Session;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Session.
struct SessionRow {
    id: String,
    token: String,
    user_id: String,
    is_active: bool,
    expires_at: String,
    created_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            token: row.try_get("token")?,
            user_id: row.try_get("user_id")?,
            is_active: row.try_get("is_active")?,
            expires_at: row.try_get("expires_at")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;

        Ok(Session {
            id,
            token: self.token,
            user_id,
            is_active: self.is_active,
            expires_at: parse_datetime(&self.expires_at)?,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl SessionRepository for SqliteSessionRepository {
    async fn find_active_session(
        &self,
        token: &str,
        user_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM sessions
               WHERE token = ? AND user_id = ? AND is_active = 1 AND expires_at > ?
               LIMIT 1"#,
        )
        .bind(token)
        .bind(user_id.to_string())
        .bind(format_datetime(&now))
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn create_session(&self, session: &Session) -> Result<Session, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO sessions (id, token, user_id, is_active, expires_at, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.token)
        .bind(session.user_id.to_string())
        .bind(session.is_active)
        .bind(format_datetime(&session.expires_at))
        .bind(format_datetime(&session.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                RepositoryError::Conflict("session token already exists".to_string())
            } else {
                RepositoryError::Query(e.to_string())
            }
        })?;

        Ok(session.clone())
    }

    async fn deactivate_session(&self, token: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE sessions SET is_active = 0 WHERE token = ?")
            .bind(token)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::user::SqliteUserRepository;
    use chrono::Duration;
    use lingo_core::repository::user::UserRepository;
    use lingo_types::user::User;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        pool
    }

    async fn insert_user(pool: &DatabasePool) -> User {
        let user = User {
            id: Uuid::now_v7(),
            name: "Anna".to_string(),
            role: None,
            created_at: Utc::now(),
        };
        SqliteUserRepository::new(pool.clone())
            .create_user(&user)
            .await
            .unwrap()
    }

    fn make_session(user_id: Uuid, token: &str, ttl: Duration) -> Session {
        Session {
            id: Uuid::now_v7(),
            token: token.to_string(),
            user_id,
            is_active: true,
            expires_at: Utc::now() + ttl,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_active_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        let user = insert_user(&pool).await;

        let session = make_session(user.id, "tok-active", Duration::hours(1));
        repo.create_session(&session).await.unwrap();

        let found = repo
            .find_active_session("tok-active", &user.id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.token, "tok-active");
        assert!(found.is_active);
    }

    #[tokio::test]
    async fn test_expired_session_not_found() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        let user = insert_user(&pool).await;

        repo.create_session(&make_session(user.id, "tok-old", Duration::seconds(-10)))
            .await
            .unwrap();

        let found = repo
            .find_active_session("tok-old", &user.id, Utc::now())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_session_of_other_user_not_found() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        let owner = insert_user(&pool).await;
        let other = insert_user(&pool).await;

        repo.create_session(&make_session(owner.id, "tok-owned", Duration::hours(1)))
            .await
            .unwrap();

        let found = repo
            .find_active_session("tok-owned", &other.id, Utc::now())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_deactivate_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        let user = insert_user(&pool).await;

        repo.create_session(&make_session(user.id, "tok-close", Duration::hours(1)))
            .await
            .unwrap();
        repo.deactivate_session("tok-close").await.unwrap();

        let found = repo
            .find_active_session("tok-close", &user.id, Utc::now())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_deactivate_unknown_token() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let err = repo.deactivate_session("nope").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_duplicate_token_conflict() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());
        let user = insert_user(&pool).await;

        repo.create_session(&make_session(user.id, "tok-dup", Duration::hours(1)))
            .await
            .unwrap();
        let err = repo
            .create_session(&make_session(user.id, "tok-dup", Duration::hours(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
