//! Periodic eviction of expired webhook results.
//!
//! Lookups already ignore expired entries; this task reclaims their memory.
//! Runs on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use media_engine_core::results::ResultStore;
use tokio_util::sync::CancellationToken;

/// Run the result retention loop until `cancel` is triggered.
pub async fn run(store: Arc<ResultStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Result retention job started"
    );

    let mut interval = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Result retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let evicted = store.evict_expired().await;
                if evicted > 0 {
                    tracing::info!(evicted, "Result retention: evicted expired results");
                } else {
                    tracing::debug!("Result retention: nothing to evict");
                }
            }
        }
    }
}
