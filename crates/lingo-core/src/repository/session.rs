//! Session repository trait definition.

use chrono::{DateTime, Utc};
use lingo_types::error::RepositoryError;
use lingo_types::session::Session;
use uuid::Uuid;

/// Repository trait for session credentials.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SessionRepository: Send + Sync {
    /// Find the session matching `token` and `user_id` that is active and
    /// expires strictly after `now`.
    fn find_active_session(
        &self,
        token: &str,
        user_id: &Uuid,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Store a newly issued session.
    ///
    /// Returns `RepositoryError::Conflict` when the token is already taken.
    fn create_session(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    /// Clear the active flag of the session holding `token`.
    ///
    /// Returns `RepositoryError::NotFound` when no session holds the token.
    fn deactivate_session(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
