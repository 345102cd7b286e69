//! Session CLI commands: open, close.
//!
//! Lingo does not issue tokens itself in production; these commands exist so
//! a local setup can be exercised end to end.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use clap::Subcommand;
use console::style;
use uuid::Uuid;

use lingo_core::repository::session::SessionRepository;
use lingo_core::repository::user::UserRepository;
use lingo_types::error::RepositoryError;
use lingo_types::session::Session;

use crate::state::AppState;

/// Prefix for generated session tokens.
const TOKEN_PREFIX: &str = "lng_";

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Open a session for a user and print its token.
    Open {
        /// Owning user id.
        #[arg(long)]
        user: Uuid,

        /// Lifetime in hours (defaults to `session.default_ttl_hours`).
        #[arg(long)]
        ttl_hours: Option<i64>,
    },

    /// Deactivate a session by token.
    Close {
        /// Session token.
        token: String,
    },
}

pub async fn run(state: &AppState, action: SessionCommand, json: bool) -> Result<()> {
    match action {
        SessionCommand::Open { user, ttl_hours } => open_session(state, user, ttl_hours, json).await,
        SessionCommand::Close { token } => close_session(state, &token, json).await,
    }
}

/// Generate an opaque session token.
pub fn generate_token() -> String {
    format!("{TOKEN_PREFIX}{}", Uuid::new_v4().simple())
}

/// Expiry `ttl_hours` after `now`. Rejects non-positive lifetimes and ones
/// past the representable date range.
pub fn session_expiry(now: DateTime<Utc>, ttl_hours: i64) -> Result<DateTime<Utc>> {
    anyhow::ensure!(ttl_hours > 0, "--ttl-hours must be positive");
    match Duration::try_hours(ttl_hours).and_then(|ttl| now.checked_add_signed(ttl)) {
        Some(expires_at) => Ok(expires_at),
        None => anyhow::bail!("--ttl-hours is out of range"),
    }
}

/// Open a session for `user_id`.
///
/// ```bash
/// lingo session open --user <user-id> --ttl-hours 8
/// ```
pub async fn open_session(
    state: &AppState,
    user_id: Uuid,
    ttl_hours: Option<i64>,
    json: bool,
) -> Result<()> {
    let user = state
        .user_repo
        .get_user(&user_id)
        .await?
        .with_context(|| format!("User '{user_id}' not found"))?;

    let ttl_hours = ttl_hours.unwrap_or(state.config.session.default_ttl_hours);
    let now = Utc::now().trunc_subsecs(6);
    let expires_at = session_expiry(now, ttl_hours)?;

    let session = Session {
        id: Uuid::now_v7(),
        token: generate_token(),
        user_id: user.id,
        is_active: true,
        expires_at,
        created_at: now,
    };
    let session = state.session_repo.create_session(&session).await?;
    tracing::info!(session_id = %session.id, user_id = %user.id, "Session opened");

    if json {
        let out = serde_json::json!({
            "session_id": session.id,
            "user_id": session.user_id,
            "token": session.token,
            "expires_at": session.expires_at,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Session opened for '{}' (expires {})",
        style("✓").green().bold(),
        style(&user.name).cyan(),
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
    println!("  {}", style(&session.token).yellow().bold());
    println!();
    println!(
        "  {}",
        style(format!(
            "Send with headers: Authorization: Bearer <token>, X-User-Id: {}",
            user.id
        ))
        .dim()
    );
    println!();

    Ok(())
}

pub async fn close_session(state: &AppState, token: &str, json: bool) -> Result<()> {
    match state.session_repo.deactivate_session(token).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => anyhow::bail!("No session with that token"),
        Err(e) => return Err(e.into()),
    }

    if json {
        println!("{}", serde_json::json!({ "closed": true }));
    } else {
        println!();
        println!("  {} Session closed", style("✓").green().bold());
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use lingo_infra::sqlite::pool::DatabasePool;
    use lingo_types::config::GlobalConfig;
    use lingo_types::user::User;

    async fn temp_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        let state =
            AppState::from_parts(GlobalConfig::default(), dir.path().to_path_buf(), pool).unwrap();
        (dir, state)
    }

    async fn seed_user(state: &AppState) -> User {
        let user = User {
            id: Uuid::now_v7(),
            name: "Anna".to_string(),
            role: None,
            created_at: Utc::now().trunc_subsecs(6),
        };
        state.user_repo.create_user(&user).await.unwrap()
    }

    #[test]
    fn test_session_expiry_adds_hours() {
        let now = Utc::now();
        assert_eq!(session_expiry(now, 8).unwrap(), now + Duration::hours(8));
    }

    #[test]
    fn test_session_expiry_rejects_non_positive() {
        let now = Utc::now();
        assert!(session_expiry(now, 0).is_err());
        assert!(session_expiry(now, -1).is_err());
    }

    #[test]
    fn test_session_expiry_rejects_overflow() {
        let now = Utc::now();
        for ttl in [10_000_000_000, i64::MAX] {
            let err = session_expiry(now, ttl).unwrap_err();
            assert!(err.to_string().contains("out of range"));
        }
    }

    #[tokio::test]
    async fn test_open_session_with_huge_ttl_fails_cleanly() {
        let (_dir, state) = temp_state().await;
        let user = seed_user(&state).await;

        let err = open_session(&state, user.id, Some(10_000_000_000), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[tokio::test]
    async fn test_huge_configured_default_ttl_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(dir.path()).await.unwrap();
        let mut config = GlobalConfig::default();
        config.session.default_ttl_hours = i64::MAX;
        let state = AppState::from_parts(config, dir.path().to_path_buf(), pool).unwrap();
        let user = seed_user(&state).await;

        assert!(open_session(&state, user.id, None, true).await.is_err());
    }

    #[tokio::test]
    async fn test_open_then_close_session() {
        let (_dir, state) = temp_state().await;
        let user = seed_user(&state).await;

        open_session(&state, user.id, Some(2), true).await.unwrap();
        assert!(close_session(&state, "lng_unknown", true).await.is_err());
    }

    #[test]
    fn test_generated_tokens_are_unique_and_prefixed() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_eq!(a.len(), TOKEN_PREFIX.len() + 32);
    }
}
