//! Keyed collection cache with request coalescing.
//!
//! The `CollectionFetcher` owns one cache entry per `CollectionKey`. A
//! refresh for a key that already has a request in flight joins that request
//! instead of issuing a new one, and every waiter observes the same outcome.

use crate::backend::{Backend, BackendError, CollectionKey};
use crate::fetcher::state::{FetchError, FetchState};
use ak_protocol::ipc::Event;
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tracing::{debug, warn};

type SharedFetch = Shared<BoxFuture<'static, Result<(), FetchError>>>;

struct CacheEntry<E> {
    data: Option<Arc<Vec<E>>>,
    error: Option<FetchError>,
    fetched_at: Option<DateTime<Utc>>,
    in_flight: Option<SharedFetch>,
}

impl<E> Default for CacheEntry<E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            in_flight: None,
        }
    }
}

impl<E> CacheEntry<E> {
    fn snapshot(&self) -> FetchState<E> {
        FetchState {
            data: self.data.clone(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

type Entries<E> = Arc<Mutex<HashMap<CollectionKey, CacheEntry<E>>>>;

/// Fetches and caches collections of `E` from a backend.
///
/// Cloning is cheap and clones share the cache, so every consumer of a key
/// sees the same collection.
pub struct CollectionFetcher<E> {
    backend: Arc<dyn Backend>,
    entries: Entries<E>,
    events_tx: Option<UnboundedSender<Event>>,
}

impl<E> Clone for CollectionFetcher<E> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            entries: Arc::clone(&self.entries),
            events_tx: self.events_tx.clone(),
        }
    }
}

impl<E> CollectionFetcher<E>
where
    E: DeserializeOwned + Send + Sync + 'static,
{
    /// Create a fetcher with an empty cache.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            entries: Arc::new(Mutex::new(HashMap::new())),
            events_tx: None,
        }
    }

    /// Report refreshes and fetch failures on `events_tx`.
    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Bind a handle to one key.
    pub fn handle(&self, key: CollectionKey) -> FetchHandle<E> {
        FetchHandle {
            fetcher: self.clone(),
            key,
        }
    }

    /// Current state for `key` without triggering a request.
    pub async fn state(&self, key: &CollectionKey) -> FetchState<E> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .map(CacheEntry::snapshot)
            .unwrap_or_default()
    }

    /// Fetch `key` if nothing was ever received for it, then return its state.
    ///
    /// A failed first fetch is reported through the returned state's `error`.
    pub async fn load(&self, key: &CollectionKey) -> FetchState<E> {
        if self.state(key).await.is_loading() {
            // Outcome is captured in the entry itself.
            let _ = self.refresh(key).await;
        }
        self.state(key).await
    }

    /// Force a re-fetch of `key` and wait for it to complete.
    ///
    /// Concurrent calls for the same key share one backend request.
    pub async fn refresh(&self, key: &CollectionKey) -> Result<(), FetchError> {
        let fetch = {
            let mut entries = self.entries.lock().await;
            let entry = entries.entry(key.clone()).or_default();
            match &entry.in_flight {
                Some(in_flight) => {
                    debug!(key = %key, "joining in-flight fetch");
                    in_flight.clone()
                }
                None => {
                    let fetch = self.start_fetch(key.clone());
                    entry.in_flight = Some(fetch.clone());
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Refresh every key currently in the cache.
    ///
    /// Used when the backend becomes reachable again.
    pub async fn revalidate_all(&self) -> Vec<Result<(), FetchError>> {
        let keys = self.keys().await;
        futures::future::join_all(keys.iter().map(|key| self.refresh(key))).await
    }

    /// Keys with a cache entry, in sorted order.
    pub async fn keys(&self) -> Vec<CollectionKey> {
        let entries = self.entries.lock().await;
        let mut keys: Vec<CollectionKey> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn start_fetch(&self, key: CollectionKey) -> SharedFetch {
        let backend = Arc::clone(&self.backend);
        let entries = Arc::clone(&self.entries);
        let events_tx = self.events_tx.clone();

        async move {
            debug!(key = %key, "fetching collection");
            let result = backend.fetch_json(&key).await.and_then(|value| {
                serde_json::from_value::<Vec<E>>(value)
                    .map_err(|e| BackendError::Decode(e.to_string()))
            });

            let mut entries = entries.lock().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.in_flight = None;

            match result {
                Ok(items) => {
                    let count = items.len();
                    debug!(key = %key, count, "collection refreshed");
                    entry.data = Some(Arc::new(items));
                    entry.error = None;
                    entry.fetched_at = Some(Utc::now());
                    if let Some(tx) = &events_tx {
                        let _ = tx.send(Event::CollectionRefreshed {
                            key: key.to_string(),
                            count,
                        });
                    }
                    Ok(())
                }
                Err(source) => {
                    let error = FetchError {
                        key: key.to_string(),
                        source,
                    };
                    warn!(key = %key, error = %error, "collection fetch failed");
                    entry.error = Some(error.clone());
                    if let Some(tx) = &events_tx {
                        let _ = tx.send(Event::CollectionFetchFailed {
                            key: key.to_string(),
                            error: error.to_string(),
                        });
                    }
                    Err(error)
                }
            }
        }
        .boxed()
        .shared()
    }
}

/// A fetcher bound to a single key: the `{data, error, is_loading, refresh}`
/// view a consumer works with.
pub struct FetchHandle<E> {
    fetcher: CollectionFetcher<E>,
    key: CollectionKey,
}

impl<E> Clone for FetchHandle<E> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            key: self.key.clone(),
        }
    }
}

impl<E> FetchHandle<E>
where
    E: DeserializeOwned + Send + Sync + 'static,
{
    pub fn key(&self) -> &CollectionKey {
        &self.key
    }

    pub async fn state(&self) -> FetchState<E> {
        self.fetcher.state(&self.key).await
    }

    pub async fn load(&self) -> FetchState<E> {
        self.fetcher.load(&self.key).await
    }

    pub async fn refresh(&self) -> Result<(), FetchError> {
        self.fetcher.refresh(&self.key).await
    }
}
