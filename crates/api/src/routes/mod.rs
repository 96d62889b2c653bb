pub mod chat;
pub mod generation;
pub mod health;
pub mod webhook;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                    service banner
/// /health                              health check
///
/// /image-generation                    forward image job (POST)
/// /video-generation                    forward video job (POST)
///
/// /webhook                             receive result callback (POST)
/// /latest-webhook?execution_id=        look up result (GET)
///
/// /api/chatgpt                         chat completion proxy (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(generation::router())
        .merge(webhook::router())
        .merge(chat::router())
}
