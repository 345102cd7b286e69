//! User repository trait definition.

use lingo_types::error::RepositoryError;
use lingo_types::user::User;
use uuid::Uuid;

/// Repository trait for user lookup.
///
/// `get_user` is how the HTTP layer resolves the identity asserted by the
/// upstream auth collaborator. Implementations live in lingo-infra.
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Returns the stored user.
    fn create_user(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by ID.
    fn get_user(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
