//! HTTP clients for the third-party services the relay talks to.
//!
//! - [`jobs::JobServiceClient`] forwards image and video jobs to the remote
//!   generation deployments.
//! - [`chat::ChatCompletionClient`] forwards prompts to a chat-completion API.
//!
//! Both classify failures the same way through [`error::UpstreamError`].

pub mod chat;
pub mod error;
pub mod jobs;
mod response;

pub use chat::ChatCompletionClient;
pub use error::UpstreamError;
pub use jobs::{JobResponse, JobServiceClient};
