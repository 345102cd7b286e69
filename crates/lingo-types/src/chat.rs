//! Chat message types for Lingo.
//!
//! Messages belong to a session and are ordered by `created_at`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender_type IN ('user', 'ai'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Ai,
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderType::User => write!(f, "user"),
            SenderType::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for SenderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(SenderType::User),
            "ai" => Ok(SenderType::Ai),
            other => Err(format!("invalid sender type: '{other}'")),
        }
    }
}

/// A single message within a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub sender_type: SenderType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a new message stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision it is
    /// stored with.
    pub fn new(user_id: Uuid, session_id: Uuid, sender_type: SenderType, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            user_id,
            sender_type,
            content,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// The assistant reply returned from one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub sender: SenderType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_type_roundtrip() {
        for sender in [SenderType::User, SenderType::Ai] {
            let parsed: SenderType = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_type_serde() {
        assert_eq!(serde_json::to_string(&SenderType::Ai).unwrap(), "\"ai\"");
        let parsed: SenderType = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, SenderType::User);
    }

    #[test]
    fn test_sender_type_rejects_unknown() {
        let err = "assistant".parse::<SenderType>().unwrap_err();
        assert!(err.contains("assistant"));
    }

    #[test]
    fn test_new_message_has_fresh_id() {
        let user_id = Uuid::now_v7();
        let session_id = Uuid::now_v7();
        let a = ChatMessage::new(user_id, session_id, SenderType::User, "hi".into());
        let b = ChatMessage::new(user_id, session_id, SenderType::User, "hi".into());
        assert_ne!(a.id, b.id);
        assert_eq!(a.session_id, session_id);
    }
}
