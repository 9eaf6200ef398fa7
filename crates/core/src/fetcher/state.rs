//! Observable state of one cached collection.

use crate::backend::BackendError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// A collection could not be retrieved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {key}: {source}")]
pub struct FetchError {
    /// Display form of the collection key.
    pub key: String,
    pub source: BackendError,
}

/// Snapshot of a cache entry as seen by a consumer.
///
/// `data` survives a failed refresh: after an error the previous successful
/// collection is still served next to `error`.
#[derive(Debug)]
pub struct FetchState<E> {
    pub data: Option<Arc<Vec<E>>>,
    pub error: Option<FetchError>,
    /// When `data` was last replaced.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<E> FetchState<E> {
    /// True until the first response (success or failure) for the key.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }

    /// The collection, or an empty slice when nothing was fetched yet.
    pub fn items(&self) -> &[E] {
        self.data.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<E> Default for FetchState<E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
        }
    }
}

impl<E> Clone for FetchState<E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_loading() {
        let state: FetchState<i64> = FetchState::default();
        assert!(state.is_loading());
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_error_without_data_is_not_loading() {
        let state: FetchState<i64> = FetchState {
            data: None,
            error: Some(FetchError {
                key: "/persona".to_string(),
                source: BackendError::Request("offline".to_string()),
            }),
            fetched_at: None,
        };
        assert!(!state.is_loading());
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_empty_collection_is_not_loading() {
        let state: FetchState<i64> = FetchState {
            data: Some(Arc::new(Vec::new())),
            error: None,
            fetched_at: Some(Utc::now()),
        };
        assert!(!state.is_loading());
    }
}
