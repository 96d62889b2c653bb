//! Handler for the chat-completion proxy (`POST /api/chatgpt`).
//!
//! Stateless: the prompt is forwarded as a single user message and the first
//! completion's text is returned. Every failure is logged before responding.

use axum::extract::State;
use axum::Json;
use media_engine_core::error::CoreError;
use media_engine_upstream::UpstreamError;
use serde::{Deserialize, Serialize};

use super::CHAT_SERVICE;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub content: String,
}

/// POST /api/chatgpt
pub async fn chat_completion(
    State(state): State<AppState>,
    AppJson(input): AppJson<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let client = state
        .chat
        .as_ref()
        .ok_or(CoreError::MissingCredential("OPENAI_API_KEY"))?;

    let content = client.complete(&input.prompt).await.map_err(chat_error)?;

    Ok(Json(ChatReply { content }))
}

fn chat_error(err: UpstreamError) -> AppError {
    match err {
        UpstreamError::Api { status, body } => {
            tracing::error!(status, body = %body, "Chat API returned an error");
            AppError::RemoteRequestFailed {
                status,
                detail: format!("API request failed: {body}"),
            }
        }
        other => AppError::upstream(CHAT_SERVICE, other),
    }
}
