//! Chat session credential type.
//!
//! A session is issued outside this system and stored alongside users.
//! It is usable only while `is_active` is set and `expires_at` lies in the
//! future.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server-issued credential bound to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Opaque bearer token presented by the client.
    #[serde(skip_serializing, default)]
    pub token: String,
    pub user_id: Uuid,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session may be used at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(is_active: bool, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::now_v7(),
            token: "tok".to_string(),
            user_id: Uuid::now_v7(),
            is_active,
            expires_at: now + expires_in,
            created_at: now,
        }
    }

    #[test]
    fn test_active_unexpired_is_usable() {
        assert!(session(true, Duration::hours(1)).is_usable_at(Utc::now()));
    }

    #[test]
    fn test_inactive_is_not_usable() {
        assert!(!session(false, Duration::hours(1)).is_usable_at(Utc::now()));
    }

    #[test]
    fn test_expired_is_not_usable() {
        assert!(!session(true, Duration::seconds(-1)).is_usable_at(Utc::now()));
    }

    #[test]
    fn test_token_not_serialized() {
        let json = serde_json::to_string(&session(true, Duration::hours(1))).unwrap();
        assert!(!json.contains("\"token\""));
    }
}
