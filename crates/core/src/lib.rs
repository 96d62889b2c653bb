//! Domain types and logic for the media engine relay.
//!
//! Nothing in this crate performs network I/O. It owns the job submission
//! shape, webhook payload parsing, and the in-memory [`results::ResultStore`]
//! that correlates webhook callbacks with polling clients.

pub mod error;
pub mod jobs;
pub mod results;
pub mod types;
pub mod webhook;
