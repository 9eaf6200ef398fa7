//! HTTP backend talking JSON to the admin API.

use crate::backend::base::{Backend, BackendError, CollectionKey};
use ak_protocol::ServerConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

/// Error bodies longer than this are truncated before they reach logs.
const MAX_ERROR_BODY: usize = 500;

/// `Backend` implementation over `reqwest`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBackend {
    /// Create a backend for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, None, Duration::from_secs(30))
    }

    /// Create a backend from the `[server]` config section.
    pub fn from_config(config: &ServerConfig) -> Result<Self, BackendError> {
        Self::with_timeout(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn with_timeout(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Turn a non-2xx response into `BackendError::Status`.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.len() > MAX_ERROR_BODY {
        let cut = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY)
            .last()
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body
    };

    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_json(&self, key: &CollectionKey) -> Result<Value, BackendError> {
        let request = self
            .client
            .get(self.url(&key.path))
            .query(&key.query)
            .header("Accept", "application/json");

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let response = check_status(response).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn patch_json(&self, path: &str, body: Value) -> Result<(), BackendError> {
        let request = self.client.patch(self.url(path)).json(&body);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/api/").unwrap();
        assert_eq!(backend.url("/persona"), "http://localhost:8080/api/persona");
    }

    #[test]
    fn test_from_config_keeps_api_key() {
        let config = ServerConfig {
            base_url: "http://example.com".to_string(),
            api_key: Some("secret".to_string()),
            timeout_secs: 5,
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.api_key.as_deref(), Some("secret"));
        assert_eq!(backend.url("/x"), "http://example.com/x");
    }
}
