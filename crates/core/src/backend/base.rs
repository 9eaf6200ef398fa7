//! Base `Backend` trait and supporting types.
//!
//! A backend is the data-access capability injected into fetchers and
//! managers: read a collection, write a preference. Everything above it is
//! transport-agnostic.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use ak_protocol::EntityId;

/// Identifies one cached collection: a backend path plus query parameters.
///
/// Two keys that differ only in a scope parameter are distinct cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionKey {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl CollectionKey {
    /// Key for an unscoped collection.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Key for a collection optionally restricted to one scope entity.
    ///
    /// `None` yields the unrestricted collection, exactly like [`CollectionKey::new`].
    pub fn scoped(path: impl Into<String>, param: &str, scope: Option<EntityId>) -> Self {
        let key = Self::new(path);
        match scope {
            Some(id) => key.with_query(param, id.to_string()),
            None => key,
        }
    }

    /// Add a query parameter. The query stays sorted, so parameter order
    /// never produces a separate cache entry.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let param = (name.into(), value.into());
        let at = self.query.partition_point(|existing| *existing <= param);
        self.query.insert(at, param);
        self
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (name, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// Errors a backend call can produce.
///
/// `Clone` so a single failed request can be reported to every caller that
/// was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the JSON document behind `key`.
    async fn fetch_json(&self, key: &CollectionKey) -> Result<Value, BackendError>;

    /// Send a JSON `PATCH` to `path`. Any 2xx response is success.
    async fn patch_json(&self, path: &str, body: Value) -> Result<(), BackendError>;
}
