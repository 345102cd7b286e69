use thiserror::Error;

/// Errors from repository operations (used by trait definitions in lingo-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the language-model backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model call timed out after {0}s")]
    Timeout(u64),

    #[error("response contained no choices")]
    EmptyChoices,
}

/// Errors surfaced by one chat turn or a history read.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("model invocation failed: {0}")]
    ModelInvocation(#[source] LlmError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ChatError {
    /// Standard rejection for a missing, inactive, or expired session.
    pub fn invalid_session() -> Self {
        ChatError::Unauthorized("Invalid or expired session token".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_invalid_session_message() {
        assert_eq!(
            ChatError::invalid_session().to_string(),
            "Invalid or expired session token"
        );
    }

    #[test]
    fn test_model_invocation_keeps_cause() {
        let err = ChatError::ModelInvocation(LlmError::Provider {
            message: "connection refused".to_string(),
        });
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_repository_error_converts() {
        let err: ChatError = RepositoryError::NotFound.into();
        assert!(matches!(err, ChatError::Repository(RepositoryError::NotFound)));
    }
}
