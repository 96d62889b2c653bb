//! Response helpers shared by the upstream clients.

use crate::error::UpstreamError;

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or an [`UpstreamError::Api`] carrying the status and
/// body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(UpstreamError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Read a successful response body and decode it as JSON.
///
/// The body is read first so a transport failure mid-body stays a
/// [`UpstreamError::Request`] while a well-delivered but malformed body
/// becomes [`UpstreamError::Decode`].
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
