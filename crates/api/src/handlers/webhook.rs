//! Handlers for webhook delivery and result lookup.
//!
//! Routes:
//! - `POST /webhook`        — store a callback payload from the remote service
//! - `GET  /latest-webhook` — fetch the payload for an execution id

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use media_engine_core::error::CoreError;
use media_engine_core::types::WebhookPayload;
use media_engine_core::webhook;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::state::AppState;

/// Acknowledgement returned to the webhook sender.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

/// Query parameters for `GET /latest-webhook`.
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub execution_id: String,
    /// Optional long-poll: wait up to this many seconds (clamped to the
    /// configured maximum) for the result to arrive.
    pub wait_secs: Option<u64>,
}

/// POST /webhook
///
/// Accepts any non-empty JSON object. Payloads carrying a string
/// `execution_id` are stored under it; others are acknowledged but cannot be
/// looked up, so they are dropped. Dropping them leaves earlier results in
/// place, even with a store capacity of 1.
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let payload = webhook::parse_payload(&body)?;

    match webhook::execution_id(&payload).map(str::to_owned) {
        Some(execution_id) => {
            let evicted = state.results.insert(execution_id.clone(), payload).await;
            tracing::info!(%execution_id, "Webhook result stored");
            if let Some(evicted) = evicted {
                tracing::warn!(
                    evicted_execution_id = %evicted,
                    "Result store at capacity, evicted oldest result"
                );
            }
        }
        None => {
            tracing::warn!(
                fields = payload.len(),
                "Webhook payload has no execution_id, not stored"
            );
        }
    }

    Ok(Json(WebhookAck { status: "success" }))
}

/// GET /latest-webhook?execution_id=ID[&wait_secs=N]
///
/// Returns the stored payload for `execution_id`, or 404. With `wait_secs`
/// the request is held open until the payload arrives or the wait elapses.
pub async fn get_result(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ResultQuery>,
) -> AppResult<Json<WebhookPayload>> {
    let payload = match query.wait_secs.filter(|secs| *secs > 0) {
        Some(secs) => {
            let wait = Duration::from_secs(secs.min(state.config.results.max_wait_secs));
            state.results.wait_for(&query.execution_id, wait).await
        }
        None => state.results.get(&query.execution_id).await,
    };

    match payload {
        Some(payload) => Ok(Json(payload)),
        None => {
            tracing::debug!(execution_id = %query.execution_id, "No result for execution");
            Err(CoreError::ResultNotFound(query.execution_id).into())
        }
    }
}
