use std::sync::Arc;
use std::time::Duration;

use media_engine_core::results::ResultStore;
use media_engine_upstream::{ChatCompletionClient, JobServiceClient, UpstreamError};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Webhook results awaiting retrieval, keyed by execution id.
    pub results: Arc<ResultStore>,
    /// Forwards image and video jobs to the remote deployments.
    pub jobs: Arc<JobServiceClient>,
    /// Chat-completion client; `None` when no API key is configured.
    pub chat: Option<Arc<ChatCompletionClient>>,
}

impl AppState {
    /// Build the state (store and upstream clients) described by `config`.
    pub fn from_config(config: ServerConfig) -> Result<Self, UpstreamError> {
        let results = ResultStore::new(
            Duration::from_secs(config.results.ttl_secs),
            config.results.capacity,
        );

        let jobs = JobServiceClient::new(
            config.jobs.image_deployment_url.clone(),
            config.jobs.video_deployment_url.clone(),
            Duration::from_secs(config.jobs.request_timeout_secs),
        )?;

        let chat = config
            .chat
            .api_key
            .clone()
            .map(|key| ChatCompletionClient::new(config.chat.base_url.clone(), key))
            .transpose()?
            .map(Arc::new);

        Ok(Self {
            config: Arc::new(config),
            results: Arc::new(results),
            jobs: Arc::new(jobs),
            chat,
        })
    }
}
