//! In-memory backend for testing.
//!
//! Collections are served from a map keyed by the collection key's display
//! form (`/llm/provider?persona_id=3`). Failures can be queued per key, and
//! every `PATCH` is recorded so tests can assert on what was persisted.

use crate::backend::base::{Backend, BackendError, CollectionKey};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
struct MockState {
    collections: HashMap<String, Value>,
    fetch_failures: HashMap<String, VecDeque<BackendError>>,
    fetch_counts: HashMap<String, usize>,
    patch_failure: Option<BackendError>,
    patches: Vec<(String, Value)>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    latency: Option<Duration>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `value` for `key` until replaced.
    pub async fn set_collection(&self, key: &str, value: Value) {
        let mut state = self.state.lock().await;
        state.collections.insert(key.to_string(), value);
    }

    /// Make the next fetch of `key` fail with `error`.
    pub async fn fail_next_fetch(&self, key: &str, error: BackendError) {
        let mut state = self.state.lock().await;
        state
            .fetch_failures
            .entry(key.to_string())
            .or_default()
            .push_back(error);
    }

    /// Make every `PATCH` fail with `error` (`None` restores success).
    pub async fn set_patch_failure(&self, error: Option<BackendError>) {
        let mut state = self.state.lock().await;
        state.patch_failure = error;
    }

    /// Number of fetches that reached the backend for `key`.
    pub async fn fetch_count(&self, key: &str) -> usize {
        let state = self.state.lock().await;
        state.fetch_counts.get(key).copied().unwrap_or(0)
    }

    /// Every `PATCH` received so far, in arrival order, including failed ones.
    pub async fn patches(&self) -> Vec<(String, Value)> {
        let state = self.state.lock().await;
        state.patches.clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_json(&self, key: &CollectionKey) -> Result<Value, BackendError> {
        self.simulate_latency().await;

        let key = key.to_string();
        let mut state = self.state.lock().await;
        *state.fetch_counts.entry(key.clone()).or_insert(0) += 1;

        if let Some(error) = state
            .fetch_failures
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }

        state
            .collections
            .get(&key)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                message: format!("no collection at {key}"),
            })
    }

    async fn patch_json(&self, path: &str, body: Value) -> Result<(), BackendError> {
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        state.patches.push((path.to_string(), body));
        match &state.patch_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
