//! User domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A learner or teacher talking to the tutor.
///
/// `role` is free-form as stored (e.g. "student", "teacher"). It only
/// influences which prompt preamble is used and the role line in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role as stored, with blank values treated as absent.
    ///
    /// Not trimmed: prompt selection compares the stored value exactly.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.trim().is_empty())
    }
}
