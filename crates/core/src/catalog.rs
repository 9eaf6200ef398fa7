//! The collections the client lists, bound to their configured endpoints.

use crate::backend::{Backend, CollectionKey};
use crate::fetcher::{CollectionFetcher, FetchError, FetchHandle};
use ak_protocol::config_models::EndpointConfig;
use ak_protocol::ipc::Event;
use ak_protocol::{EntityId, LlmProviderDescriptor, MinimalPersonaSnapshot, UserGroup};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

/// One fetcher per entity type, sharing a backend.
///
/// Clones share every cache.
#[derive(Clone)]
pub struct Catalog {
    endpoints: EndpointConfig,
    personas: CollectionFetcher<MinimalPersonaSnapshot>,
    user_groups: CollectionFetcher<UserGroup>,
    llm_providers: CollectionFetcher<LlmProviderDescriptor>,
}

impl Catalog {
    pub fn new(backend: Arc<dyn Backend>, endpoints: EndpointConfig) -> Self {
        Self {
            endpoints,
            personas: CollectionFetcher::new(Arc::clone(&backend)),
            user_groups: CollectionFetcher::new(Arc::clone(&backend)),
            llm_providers: CollectionFetcher::new(backend),
        }
    }

    pub fn with_events(self, events_tx: UnboundedSender<Event>) -> Self {
        Self {
            endpoints: self.endpoints,
            personas: self.personas.with_events(events_tx.clone()),
            user_groups: self.user_groups.with_events(events_tx.clone()),
            llm_providers: self.llm_providers.with_events(events_tx),
        }
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    pub fn personas(&self) -> FetchHandle<MinimalPersonaSnapshot> {
        self.personas
            .handle(CollectionKey::new(self.endpoints.personas.clone()))
    }

    pub fn user_groups(&self) -> FetchHandle<UserGroup> {
        self.user_groups
            .handle(CollectionKey::new(self.endpoints.user_groups.clone()))
    }

    /// Providers visible to `persona`, or all of them when `None`.
    pub fn llm_providers(&self, persona: Option<EntityId>) -> FetchHandle<LlmProviderDescriptor> {
        self.llm_providers.handle(CollectionKey::scoped(
            self.endpoints.llm_providers.clone(),
            &self.endpoints.llm_provider_scope_param,
            persona,
        ))
    }

    /// Refresh every cached collection, e.g. after the backend became
    /// reachable again. Returns the failures.
    pub async fn revalidate_all(&self) -> Vec<FetchError> {
        let (personas, groups, providers) = futures::join!(
            self.personas.revalidate_all(),
            self.user_groups.revalidate_all(),
            self.llm_providers.revalidate_all(),
        );
        let failures: Vec<FetchError> = personas
            .into_iter()
            .chain(groups)
            .chain(providers)
            .filter_map(Result::err)
            .collect();
        info!(failures = failures.len(), "revalidated cached collections");
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_provider_collections_are_scoped_per_persona() {
        let backend = MockBackend::new();
        backend
            .set_collection(
                "/llm/provider",
                json!([{"id": 1, "name": "Public", "provider": "openai", "default_model_name": "gpt-4o"}]),
            )
            .await;
        backend
            .set_collection(
                "/llm/provider?persona_id=3",
                json!([
                    {"id": 1, "name": "Public", "provider": "openai", "default_model_name": "gpt-4o"},
                    {"id": 2, "name": "Restricted", "provider": "anthropic", "default_model_name": "claude", "is_public": false, "personas": [3]}
                ]),
            )
            .await;
        let catalog = Catalog::new(Arc::new(backend.clone()), EndpointConfig::default());

        let all = catalog.llm_providers(None).load().await;
        let scoped = catalog.llm_providers(Some(3)).load().await;

        assert_eq!(all.items().len(), 1);
        assert_eq!(scoped.items().len(), 2);
        assert_eq!(backend.fetch_count("/llm/provider").await, 1);
        assert_eq!(backend.fetch_count("/llm/provider?persona_id=3").await, 1);
    }

    #[tokio::test]
    async fn test_revalidate_all_reports_failures() {
        let backend = MockBackend::new();
        backend
            .set_collection("/persona", json!([{"id": 1, "name": "A"}]))
            .await;
        let catalog = Catalog::new(Arc::new(backend.clone()), EndpointConfig::default());

        catalog.personas().load().await;
        // No collection configured for groups: every fetch is a 404.
        catalog.user_groups().load().await;

        let failures = catalog.revalidate_all().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key, "/manage/admin/user-group");
        assert_eq!(backend.fetch_count("/persona").await, 2);
    }
}
