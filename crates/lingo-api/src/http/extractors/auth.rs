//! Request credential extractor.
//!
//! Resolves the caller from two headers:
//! - `X-User-Id: <uuid>`: the user as established by the upstream auth layer.
//! - `Authorization: Bearer <token>`: the session token to validate.
//!
//! Only the user lookup happens here; the session token is checked by the
//! chat service so that validation and the chat flow share one code path.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use lingo_core::repository::user::UserRepository;
use lingo_types::error::ChatError;
use lingo_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The resolved user and the raw session token they presented.
pub struct Credentials {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<AppState> for Credentials {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let user_id = extract_user_id(parts)?;

        let user = state
            .user_repo
            .get_user(&user_id)
            .await
            .map_err(|e| AppError::Chat(ChatError::Repository(e)))?
            .ok_or_else(|| {
                tracing::debug!(%user_id, "Unknown user id presented");
                AppError::Unauthorized("Unknown user".to_string())
            })?;

        Ok(Credentials { user, token })
    }
}

/// Extract the raw `Authorization` header value. Scheme stripping happens
/// in the session validator.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    let value = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| {
            AppError::Unauthorized(
                "Missing session token. Provide via 'Authorization: Bearer <token>' header."
                    .to_string(),
            )
        })?;

    let value = value.to_str().map_err(|_| {
        AppError::Unauthorized("Invalid Authorization header encoding".to_string())
    })?;

    Ok(value.to_string())
}

fn extract_user_id(parts: &Parts) -> Result<Uuid, AppError> {
    let value = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
        AppError::Unauthorized("Missing user id. Provide via 'X-User-Id' header.".to_string())
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or_else(|| AppError::Unauthorized("Invalid X-User-Id header".to_string()))
}
