//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /chat          - Run one tutor turn and return the AI reply
//! - GET  /chat/history  - List the session's messages oldest-first

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingo_types::chat::{ChatMessage, ChatReply, SenderType};

use crate::http::error::AppError;
use crate::http::extractors::auth::Credentials;
use crate::state::AppState;

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// One record in the `GET /chat/history` response.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub sender_type: SenderType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for HistoryEntry {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender_type: message.sender_type,
            content: message.content,
            timestamp: message.created_at,
        }
    }
}

/// POST /chat - Send a message and receive the model's reply.
pub async fn send_message(
    State(state): State<AppState>,
    credentials: Credentials,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let start = Instant::now();

    let reply = state
        .chat_service
        .send_message(&credentials.user, &credentials.token, request.content)
        .await?;

    tracing::debug!(
        user_id = %credentials.user.id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "POST /chat served"
    );

    Ok(Json(reply))
}

/// GET /chat/history - All messages of the caller's session, oldest first.
pub async fn get_history(
    State(state): State<AppState>,
    credentials: Credentials,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let messages = state
        .chat_service
        .history(&credentials.user, &credentials.token)
        .await?;

    Ok(Json(messages.into_iter().map(HistoryEntry::from).collect()))
}
