//! Route definitions for result callbacks and lookups.
//!
//! ```text
//! POST   /webhook                        receive_webhook
//! GET    /latest-webhook                 get_result
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(webhook::receive_webhook))
        .route("/latest-webhook", get(webhook::get_result))
}
