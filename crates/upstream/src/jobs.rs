//! Client for the remote generation deployments.
//!
//! A job is forwarded with a single `POST` of the [`JobSubmission`] JSON. The
//! remote service acknowledges immediately and later delivers the result to
//! the submission's callback URL.

use std::time::Duration;

use media_engine_core::jobs::{JobSubmission, WorkflowKind};

use crate::error::UpstreamError;
use crate::response::{ensure_success, parse_json};

/// Deployment executions endpoint used for both workflow kinds unless
/// overridden.
pub const DEFAULT_DEPLOYMENT_URL: &str =
    "https://salt-api-prod.getsalt.ai/api/v1/deployments/402a0423-e8d0-4eee-9022-0b12444c4400/executions/";

/// A successful acknowledgement from the remote deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct JobResponse {
    /// The remote's 2xx status code, returned to the caller unchanged.
    pub status: u16,
    /// The remote's JSON body, returned to the caller unchanged.
    pub body: serde_json::Value,
}

/// HTTP client for the image and video deployments.
pub struct JobServiceClient {
    client: reqwest::Client,
    image_endpoint: String,
    video_endpoint: String,
}

impl JobServiceClient {
    /// Create a client whose requests are bounded by `timeout`.
    pub fn new(
        image_endpoint: String,
        video_endpoint: String,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, image_endpoint, video_endpoint))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        image_endpoint: String,
        video_endpoint: String,
    ) -> Self {
        Self {
            client,
            image_endpoint,
            video_endpoint,
        }
    }

    /// The deployment URL jobs of `kind` are sent to.
    pub fn endpoint(&self, kind: WorkflowKind) -> &str {
        match kind {
            WorkflowKind::Image => &self.image_endpoint,
            WorkflowKind::Video => &self.video_endpoint,
        }
    }

    /// Forward a job to the deployment for `kind`.
    ///
    /// Single attempt. Non-2xx responses become [`UpstreamError::Api`] with
    /// the remote body verbatim; connection failures and timeouts become
    /// [`UpstreamError::Request`].
    pub async fn submit(
        &self,
        kind: WorkflowKind,
        submission: &JobSubmission,
    ) -> Result<JobResponse, UpstreamError> {
        let endpoint = self.endpoint(kind);
        tracing::debug!(%kind, endpoint, callback = %submission.callback, "Forwarding job");

        let response = self
            .client
            .post(endpoint)
            .json(submission)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let status = response.status().as_u16();
        let body = parse_json(response).await?;

        tracing::info!(%kind, status, "Job accepted by remote deployment");

        Ok(JobResponse { status, body })
    }
}
