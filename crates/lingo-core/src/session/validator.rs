//! Session validator.
//!
//! Checks a presented token against stored session state for the
//! authenticated user. The token may arrive raw or with an auth scheme
//! prefix (`Bearer <token>`); the prefix is stripped before lookup.

use chrono::Utc;
use tracing::debug;

use lingo_types::error::ChatError;
use lingo_types::session::Session;
use lingo_types::user::User;

use crate::repository::session::SessionRepository;

/// Auth schemes accepted in front of a session token.
const AUTH_SCHEMES: &[&str] = &["Bearer"];

/// Strip a recognized auth scheme prefix and surrounding whitespace.
///
/// Scheme matching is case-insensitive. Input without a recognized scheme
/// is returned trimmed.
pub fn strip_auth_scheme(presented: &str) -> &str {
    let presented = presented.trim();
    for scheme in AUTH_SCHEMES {
        if presented.eq_ignore_ascii_case(scheme) {
            return "";
        }
        if let Some((prefix, rest)) = presented.split_once(' ') {
            if prefix.eq_ignore_ascii_case(scheme) {
                return rest.trim();
            }
        }
    }
    presented
}

/// Validates session tokens for a user.
pub struct SessionValidator<S: SessionRepository> {
    session_repo: S,
}

impl<S: SessionRepository> SessionValidator<S> {
    pub fn new(session_repo: S) -> Self {
        Self { session_repo }
    }

    /// Return the active, unexpired session matching the token and user.
    ///
    /// Fails with `ChatError::Unauthorized` when there is none. Repository
    /// failures propagate as `ChatError::Repository`.
    pub async fn validate(&self, presented: &str, user: &User) -> Result<Session, ChatError> {
        let token = strip_auth_scheme(presented);
        if token.is_empty() {
            debug!(user_id = %user.id, "Rejected empty session token");
            return Err(ChatError::invalid_session());
        }

        let now = Utc::now();
        match self
            .session_repo
            .find_active_session(token, &user.id, now)
            .await?
        {
            Some(session) if session.user_id == user.id && session.is_usable_at(now) => {
                Ok(session)
            }
            _ => {
                debug!(user_id = %user.id, "No active session for presented token");
                Err(ChatError::invalid_session())
            }
        }
    }
}
