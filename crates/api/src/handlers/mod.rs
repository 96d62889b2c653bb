pub mod chat;
pub mod generation;
pub mod webhook;

/// Service name used in transport error details for the job deployments.
pub const JOB_SERVICE: &str = "job service";

/// Service name used in transport error details for the chat API.
pub const CHAT_SERVICE: &str = "OpenAI API";
