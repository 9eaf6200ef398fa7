//! Agents context: everything a session knows about the user's agents.
//!
//! The `AgentsContext` combines:
//! - The agents collection, served from the initial snapshot until fetched
//! - The pinned agents, managed by a `PinnedManager`
//! - The agent focused by the current scope
//! - Per-agent preferences, updated optimistically
//! - Tools forced on for the next message

use crate::backend::{Backend, BackendError, CollectionKey};
use crate::catalog::Catalog;
use crate::fetcher::FetchError;
use crate::pinned::{
    PendingCounter, PersistError, PersistTask, PinError, PinnedManager, ScopeParams,
};
use ak_protocol::config_models::ClientConfig;
use ak_protocol::ipc::Event;
use ak_protocol::{
    CurrentUser, EntityId, MinimalPersonaSnapshot, UserSpecificAgentPreference,
    UserSpecificAgentPreferences,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Pin(#[from] PinError),
}

pub struct AgentsContext {
    backend: Arc<dyn Backend>,
    config: ClientConfig,
    pinned: PinnedManager<MinimalPersonaSnapshot>,
    preferences: Option<UserSpecificAgentPreferences>,
    forced_tool_ids: Vec<EntityId>,
    pending: PendingCounter,
    events_tx: Option<UnboundedSender<Event>>,
}

impl AgentsContext {
    /// Build a context whose agents collection comes from `catalog`.
    pub fn new(backend: Arc<dyn Backend>, catalog: &Catalog, config: ClientConfig) -> Self {
        let pinned = PinnedManager::new(
            Arc::clone(&backend),
            catalog.personas(),
            config.endpoints.pinned_items.clone(),
        );
        Self {
            backend,
            config,
            pinned,
            preferences: None,
            forced_tool_ids: Vec::new(),
            pending: PendingCounter::default(),
            events_tx: None,
        }
    }

    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.pinned = self.pinned.with_events(events_tx.clone());
        self.events_tx = Some(events_tx);
        self
    }

    /// Initialize from data the caller already has. Nothing is saved.
    pub fn hydrate(
        &mut self,
        agents: Vec<MinimalPersonaSnapshot>,
        pinned_agent_ids: Option<&[EntityId]>,
    ) {
        self.pinned.hydrate(agents, pinned_agent_ids);
    }

    /// Fetch the agents and the user's explicit pin order, then hydrate.
    pub async fn bootstrap(&mut self) -> Result<(), AgentsError> {
        let user: CurrentUser = self.get(&self.config.endpoints.current_user).await?;
        self.pinned.refresh().await?;

        let agents = self.pinned.candidates().await;
        self.pinned.hydrate(
            agents.to_vec(),
            user.preferences.pinned_assistants.as_deref(),
        );
        Ok(())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn pinned_manager(&self) -> &PinnedManager<MinimalPersonaSnapshot> {
        &self.pinned
    }

    /// All agents: fetched data, or the hydration snapshot.
    pub async fn agents(&self) -> Arc<Vec<MinimalPersonaSnapshot>> {
        self.pinned.candidates().await
    }

    pub async fn refresh_agents(&self) -> Result<(), FetchError> {
        self.pinned.refresh().await
    }

    /// Pinned agents in pin order. Pins without a current agent are skipped.
    pub async fn pinned_agents(&self) -> Vec<MinimalPersonaSnapshot> {
        self.pinned.pinned_view().await
    }

    pub fn pinned_agent_ids(&self) -> &[EntityId] {
        self.pinned.pinned_ids()
    }

    pub fn is_pinned(&self, agent_id: EntityId) -> bool {
        self.pinned.is_pinned(agent_id)
    }

    pub fn toggle_pinned_agent(
        &mut self,
        agent: &MinimalPersonaSnapshot,
        should_pin: bool,
    ) -> Result<Option<PersistTask>, PinError> {
        self.pinned.toggle_pinned(agent, should_pin)
    }

    /// Pin or unpin by ID. Pinning an ID with no current agent fails with
    /// [`PinError::UnknownEntity`].
    pub async fn toggle_pinned_agent_id(
        &mut self,
        agent_id: EntityId,
        should_pin: bool,
    ) -> Result<Option<PersistTask>, PinError> {
        self.pinned.toggle_pinned_id(agent_id, should_pin).await
    }

    pub fn set_pinned_agents(
        &mut self,
        agent_ids: Vec<EntityId>,
    ) -> Result<Option<PersistTask>, PinError> {
        self.pinned.set_pinned(agent_ids)
    }

    /// The agent named by the scope's focus parameter.
    pub async fn current_agent(&self, scope: &ScopeParams) -> Option<MinimalPersonaSnapshot> {
        self.pinned
            .current_focused(scope, &self.config.ui.focus_param)
            .await
    }

    /// Fetch all per-agent preferences, replacing the local copy.
    pub async fn load_agent_preferences(
        &mut self,
    ) -> Result<&UserSpecificAgentPreferences, AgentsError> {
        let preferences: UserSpecificAgentPreferences =
            self.get(&self.config.endpoints.agent_preferences).await?;
        debug!(agents = preferences.len(), "agent preferences loaded");
        Ok(self.preferences.insert(preferences))
    }

    /// Preference saves still in flight.
    pub fn pending_preference_saves(&self) -> usize {
        self.pending.get()
    }

    /// Local preferences; `None` until loaded or first set.
    pub fn agent_preferences(&self) -> Option<&UserSpecificAgentPreferences> {
        self.preferences.as_ref()
    }

    /// Replace one agent's preferences locally and save them in the background.
    pub fn set_specific_agent_preferences(
        &mut self,
        agent_id: EntityId,
        preference: UserSpecificAgentPreference,
    ) -> Result<PersistTask, PinError> {
        let runtime = Handle::try_current().map_err(|_| PinError::NoRuntime)?;
        self.preferences
            .get_or_insert_with(Default::default)
            .insert(agent_id, preference.clone());

        let backend = Arc::clone(&self.backend);
        let path = self.config.endpoints.agent_preference_path(agent_id);
        let events_tx = self.events_tx.clone();

        Ok(PersistTask::spawn(&runtime, &self.pending, move |task_id| async move {
            let body = serde_json::to_value(&preference).map_err(|e| PersistError::Preference {
                agent_id,
                source: BackendError::Request(e.to_string()),
            })?;

            match backend.patch_json(&path, body).await {
                Ok(()) => {
                    debug!(%task_id, agent_id, "agent preferences saved");
                    Ok(())
                }
                Err(source) => {
                    let error = PersistError::Preference { agent_id, source };
                    warn!(%task_id, error = %error, "agent preferences save failed");
                    if let Some(tx) = &events_tx {
                        let _ = tx.send(Event::PreferencePersistFailed {
                            agent_id,
                            error: error.to_string(),
                        });
                    }
                    Err(error)
                }
            }
        }))
    }

    pub fn forced_tool_ids(&self) -> &[EntityId] {
        &self.forced_tool_ids
    }

    pub fn set_forced_tool_ids(&mut self, tool_ids: Vec<EntityId>) {
        info!(count = tool_ids.len(), "forced tools updated");
        self.forced_tool_ids = tool_ids;
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let value = self.backend.fetch_json(&CollectionKey::new(path)).await?;
        serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
    }
}
