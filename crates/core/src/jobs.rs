//! Job submission types shared by the HTTP layer and the job service client.
//!
//! Image and video jobs share one wire contract; [`WorkflowKind`] only
//! selects which remote deployment receives the job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic intent of a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Image,
    Video,
}

impl WorkflowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowKind::Image => "image",
            WorkflowKind::Video => "video",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /image-generation` and `POST /video-generation`.
///
/// Forwarded to the remote deployment as-is. `workflow_input` is opaque and
/// never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    /// URL the remote service calls back once the job completes.
    pub callback: String,
    /// Workflow-specific input, passed through without interpretation.
    pub workflow_input: serde_json::Map<String, serde_json::Value>,
}
