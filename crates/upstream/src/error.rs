/// Errors from calls to an upstream HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, passed back to callers verbatim.
        body: String,
    },

    /// A 2xx response whose body was not the JSON we expected.
    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}
