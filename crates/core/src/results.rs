//! In-memory store correlating webhook callbacks with polling clients.
//!
//! Results are keyed by execution id, so a callback for one job never
//! displaces the unretrieved result of another unless the store is at
//! capacity. Entries expire after a fixed time-to-live; expired entries are
//! invisible to lookups and are removed by [`ResultStore::evict_expired`].

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Notify, RwLock};

use crate::types::{Timestamp, WebhookPayload};

/// A webhook payload together with the time it was received.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub payload: WebhookPayload,
    pub received_at: Timestamp,
}

/// Thread-safe keyed result store with TTL and capacity eviction.
///
/// Designed to be wrapped in `Arc` and shared across handlers. The lock is
/// only held for map operations, never across I/O.
pub struct ResultStore {
    results: RwLock<HashMap<String, StoredResult>>,
    arrivals: Notify,
    ttl: chrono::Duration,
    capacity: usize,
}

impl ResultStore {
    /// Create an empty store.
    ///
    /// `capacity` is clamped to at least 1. A capacity of 1 keeps only the
    /// most recent callback, whichever execution it belongs to.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            results: RwLock::new(HashMap::new()),
            arrivals: Notify::new(),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            capacity: capacity.max(1),
        }
    }

    /// Store `payload` under `execution_id`, replacing any earlier payload for
    /// the same id, and wake every pending [`wait_for`](Self::wait_for).
    ///
    /// Returns the id of the entry evicted to stay within capacity, if any.
    pub async fn insert(&self, execution_id: String, payload: WebhookPayload) -> Option<String> {
        self.insert_at(execution_id, payload, Utc::now()).await
    }

    /// [`insert`](Self::insert) with an explicit receive time.
    pub async fn insert_at(
        &self,
        execution_id: String,
        payload: WebhookPayload,
        received_at: Timestamp,
    ) -> Option<String> {
        let evicted = {
            let mut results = self.results.write().await;
            results.insert(
                execution_id.clone(),
                StoredResult {
                    payload,
                    received_at,
                },
            );

            if results.len() > self.capacity {
                let oldest = results
                    .iter()
                    .filter(|(id, _)| **id != execution_id)
                    .min_by_key(|(_, stored)| stored.received_at)
                    .map(|(id, _)| id.clone());
                if let Some(id) = &oldest {
                    results.remove(id);
                }
                oldest
            } else {
                None
            }
        };

        self.arrivals.notify_waiters();
        evicted
    }

    /// Look up the unexpired payload for `execution_id`.
    pub async fn get(&self, execution_id: &str) -> Option<WebhookPayload> {
        self.get_at(execution_id, Utc::now()).await
    }

    /// [`get`](Self::get) evaluated at an explicit point in time.
    pub async fn get_at(&self, execution_id: &str, now: Timestamp) -> Option<WebhookPayload> {
        self.results
            .read()
            .await
            .get(execution_id)
            .filter(|stored| !self.is_expired(stored, now))
            .map(|stored| stored.payload.clone())
    }

    /// Wait up to `timeout` for a payload for `execution_id` to arrive.
    ///
    /// Returns immediately if one is already stored. Returns `None` if the
    /// wait elapses first. A `timeout` too large to represent as a deadline
    /// waits without one.
    pub async fn wait_for(&self, execution_id: &str, timeout: Duration) -> Option<WebhookPayload> {
        let deadline = tokio::time::Instant::now().checked_add(timeout);

        loop {
            // Register interest before checking so an insert between the
            // check and the await is not missed.
            let notified = self.arrivals.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(payload) = self.get(execution_id).await {
                return Some(payload);
            }

            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, notified).await.is_err() {
                        return None;
                    }
                }
                None => notified.await,
            }
        }
    }

    /// Remove every entry older than the TTL. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        self.evict_expired_at(Utc::now()).await
    }

    /// [`evict_expired`](Self::evict_expired) evaluated at an explicit point
    /// in time.
    pub async fn evict_expired_at(&self, now: Timestamp) -> usize {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|_, stored| !self.is_expired(stored, now));
        before - results.len()
    }

    /// Number of entries currently held, including expired ones not yet
    /// evicted.
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }

    fn is_expired(&self, stored: &StoredResult, now: Timestamp) -> bool {
        now.signed_duration_since(stored.received_at) > self.ttl
    }
}
