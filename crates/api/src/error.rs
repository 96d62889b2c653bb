use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use media_engine_core::error::CoreError;
use media_engine_upstream::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the upstream and
/// internal variants. Implements [`IntoResponse`] to produce consistent
/// `{ "detail", "code" }` JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `media_engine_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream service answered with a non-2xx status. Status and detail
    /// are passed through to the caller.
    #[error("Remote request failed ({status}): {detail}")]
    RemoteRequestFailed { status: u16, detail: String },

    /// An upstream service could not be reached. The message is logged, never
    /// returned.
    #[error("Request to {service} failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// The request body or query string could not be decoded.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An internal error with a message for the logs only.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify a failed call to `service`: status errors keep the remote
    /// status and body, transport failures and undecodable replies are
    /// reported generically.
    pub fn upstream(service: &'static str, err: UpstreamError) -> Self {
        match err {
            UpstreamError::Api { status, body } => AppError::RemoteRequestFailed {
                status,
                detail: body,
            },
            UpstreamError::Request(e) => AppError::Transport {
                service,
                message: e.to_string(),
            },
            UpstreamError::Decode(e) => {
                AppError::InternalError(format!("Malformed response from {service}: {e}"))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::ResultNotFound(_) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "No data found for this execution ID".to_string(),
                ),
                CoreError::InvalidWebhookPayload(reason) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_WEBHOOK_PAYLOAD",
                    format!("Invalid webhook payload: {reason}"),
                ),
                CoreError::MissingCredential(name) => {
                    tracing::error!(credential = name, "Required credential is not configured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "MISSING_CREDENTIAL",
                        "API key is missing".to_string(),
                    )
                }
            },

            // --- Upstream errors ---
            AppError::RemoteRequestFailed { status, detail } => (
                remote_status(*status),
                "REMOTE_REQUEST_FAILED",
                detail.clone(),
            ),
            AppError::Transport { service, message } => {
                tracing::error!(service, error = %message, "Upstream request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TRANSPORT_ERROR",
                    format!("Request to {service} failed"),
                )
            }

            // --- Request decoding ---
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),

            // --- Everything else ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "detail": detail,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// The upstream's status if it is an error status, else 502.
fn remote_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
