use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// ```text
/// POST   /api/chatgpt                    chat_completion
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/api/chatgpt", post(chat::chat_completion))
}
