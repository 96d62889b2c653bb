//! Parsing of inbound webhook bodies from the remote generation service.

use crate::error::CoreError;
use crate::types::WebhookPayload;

/// Field the remote service uses to identify the execution a callback
/// belongs to.
pub const EXECUTION_ID_FIELD: &str = "execution_id";

/// Parse a raw webhook body into a non-empty JSON object.
///
/// Empty bodies, malformed JSON, non-object JSON and `{}` are all rejected
/// with [`CoreError::InvalidWebhookPayload`].
pub fn parse_payload(body: &[u8]) -> Result<WebhookPayload, CoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::InvalidWebhookPayload("body is empty".into()));
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::InvalidWebhookPayload(format!("malformed JSON: {e}")))?;

    match value {
        serde_json::Value::Object(map) if !map.is_empty() => Ok(map),
        serde_json::Value::Object(_) => {
            Err(CoreError::InvalidWebhookPayload("object is empty".into()))
        }
        _ => Err(CoreError::InvalidWebhookPayload(
            "body must be a JSON object".into(),
        )),
    }
}

/// The payload's execution id, if it carries a non-empty string one.
pub fn execution_id(payload: &WebhookPayload) -> Option<&str> {
    payload
        .get(EXECUTION_ID_FIELD)
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
}
