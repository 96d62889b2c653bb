use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use axum::http::HeaderValue;
use media_engine_upstream::chat::DEFAULT_BASE_URL;
use media_engine_upstream::jobs::DEFAULT_DEPLOYMENT_URL;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A `*` entry permits every origin.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
    pub jobs: JobServiceConfig,
    pub chat: ChatConfig,
    pub results: ResultStoreConfig,
}

/// Remote generation deployments.
#[derive(Debug, Clone)]
pub struct JobServiceConfig {
    pub image_deployment_url: String,
    pub video_deployment_url: String,
    /// Timeout for a single forwarded submission (default: `60`).
    pub request_timeout_secs: u64,
}

/// Chat-completion proxy.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// `OPENAI_API_KEY`; the chat route fails with 500 when unset.
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Retention and polling limits for webhook results.
#[derive(Debug, Clone)]
pub struct ResultStoreConfig {
    pub ttl_secs: u64,
    /// Maximum number of retained results. `1` keeps only the latest.
    pub capacity: usize,
    pub sweep_interval_secs: u64,
    /// Upper bound on `wait_secs` for long-polling lookups.
    pub max_wait_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                   |
    /// |------------------------------|---------------------------|
    /// | `HOST`                       | `0.0.0.0`                 |
    /// | `PORT`                       | `8000`                    |
    /// | `CORS_ORIGINS`               | `*`                       |
    /// | `REQUEST_TIMEOUT_SECS`       | `120`                     |
    /// | `IMAGE_DEPLOYMENT_URL`       | Salt deployment URL       |
    /// | `VIDEO_DEPLOYMENT_URL`       | Salt deployment URL       |
    /// | `JOB_REQUEST_TIMEOUT_SECS`   | `60`                      |
    /// | `OPENAI_API_KEY`             | unset                     |
    /// | `OPENAI_BASE_URL`            | `https://api.openai.com`  |
    /// | `RESULT_TTL_SECS`            | `3600`                    |
    /// | `RESULT_CAPACITY`            | `1024`                    |
    /// | `RESULT_SWEEP_INTERVAL_SECS` | `60`                      |
    /// | `RESULT_MAX_WAIT_SECS`       | `30`                      |
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env_string("HOST", "0.0.0.0");
        let port: u16 = env_parse("PORT", "8000")?;

        let cors_origins: Vec<String> = env_string("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_origins.iter().filter(|o| *o != "*") {
            if HeaderValue::from_str(origin).is_err() {
                bail!("Invalid CORS origin '{origin}'");
            }
        }

        let request_timeout_secs = env_parse("REQUEST_TIMEOUT_SECS", "120")?;

        let jobs = JobServiceConfig {
            image_deployment_url: env_string("IMAGE_DEPLOYMENT_URL", DEFAULT_DEPLOYMENT_URL),
            video_deployment_url: env_string("VIDEO_DEPLOYMENT_URL", DEFAULT_DEPLOYMENT_URL),
            request_timeout_secs: env_parse("JOB_REQUEST_TIMEOUT_SECS", "60")?,
        };

        let chat = ChatConfig {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: env_string("OPENAI_BASE_URL", DEFAULT_BASE_URL),
        };

        let results = ResultStoreConfig {
            ttl_secs: env_parse("RESULT_TTL_SECS", "3600")?,
            capacity: env_parse("RESULT_CAPACITY", "1024")?,
            sweep_interval_secs: env_parse("RESULT_SWEEP_INTERVAL_SECS", "60")?,
            max_wait_secs: env_parse("RESULT_MAX_WAIT_SECS", "30")?,
        };

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jobs,
            chat,
            results,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot honour.
    ///
    /// Long-polls must finish before the whole-request timeout, otherwise
    /// they end in 408 instead of 404.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.results.capacity == 0 {
            bail!("RESULT_CAPACITY must be at least 1");
        }
        if self.results.sweep_interval_secs == 0 {
            bail!("RESULT_SWEEP_INTERVAL_SECS must be at least 1");
        }
        if self.results.max_wait_secs >= self.request_timeout_secs {
            bail!(
                "RESULT_MAX_WAIT_SECS ({}) must be below REQUEST_TIMEOUT_SECS ({})",
                self.results.max_wait_secs,
                self.request_timeout_secs
            );
        }
        Ok(())
    }
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn env_parse<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env_string(name, default);
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{name} has invalid value '{raw}': {e}"))
}
