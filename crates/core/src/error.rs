#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No data found for execution {0}")]
    ResultNotFound(String),

    #[error("Invalid webhook payload: {0}")]
    InvalidWebhookPayload(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}
