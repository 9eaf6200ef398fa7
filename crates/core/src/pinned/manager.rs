//! The pinned-items preference manager.
//!
//! Owns the pinned list for one session. Mutations are applied locally and
//! immediately, then the full order is saved in the background. A refresh of
//! the candidate collection never touches the pinned list.

use crate::backend::{Backend, BackendError};
use crate::fetcher::{FetchError, FetchHandle};
use crate::pinned::focus::ScopeParams;
use crate::pinned::list::PinnedList;
use crate::pinned::persist::{PendingCounter, PersistError, PersistTask};
use ak_protocol::ipc::Event;
use ak_protocol::{Entity, EntityId, PinnedOrderRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    #[error("Pinned list has not been hydrated")]
    NotHydrated,
    #[error("No tokio runtime available to run the save")]
    NoRuntime,
    #[error("No entity with id {0} in the current collection")]
    UnknownEntity(EntityId),
}

/// Lifecycle of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Uninitialized,
    Hydrated,
    /// Local changes exist whose saves have not finished.
    Mutated { pending: usize },
}

pub struct PinnedManager<E> {
    backend: Arc<dyn Backend>,
    collection: FetchHandle<E>,
    pinned_path: String,
    initial: Arc<Vec<E>>,
    pins: Option<PinnedList>,
    pending: PendingCounter,
    events_tx: Option<UnboundedSender<Event>>,
}

impl<E> PinnedManager<E>
where
    E: Entity + Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Create an uninitialized manager over `collection`, saving to `pinned_path`.
    pub fn new(
        backend: Arc<dyn Backend>,
        collection: FetchHandle<E>,
        pinned_path: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            collection,
            pinned_path: pinned_path.into(),
            initial: Arc::new(Vec::new()),
            pins: None,
            pending: PendingCounter::default(),
            events_tx: None,
        }
    }

    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Initialize from the server-provided snapshot and the user's explicit
    /// pin list, if any. Nothing is saved.
    ///
    /// `candidates` is also the collection served until the fetcher has data.
    pub fn hydrate(&mut self, candidates: Vec<E>, explicit: Option<&[EntityId]>) -> &PinnedList {
        let pins = PinnedList::initial(&candidates, explicit);
        info!(
            candidates = candidates.len(),
            pinned = pins.len(),
            explicit = explicit.is_some(),
            "pinned list hydrated"
        );
        self.initial = Arc::new(candidates);
        self.pins.insert(pins)
    }

    pub fn state(&self) -> ManagerState {
        match (&self.pins, self.pending.get()) {
            (None, _) => ManagerState::Uninitialized,
            (Some(_), 0) => ManagerState::Hydrated,
            (Some(_), pending) => ManagerState::Mutated { pending },
        }
    }

    pub fn pinned(&self) -> Option<&PinnedList> {
        self.pins.as_ref()
    }

    /// Pinned IDs in order, including ones without a current candidate.
    pub fn pinned_ids(&self) -> &[EntityId] {
        self.pins.as_ref().map(PinnedList::ids).unwrap_or(&[])
    }

    pub fn is_pinned(&self, id: EntityId) -> bool {
        self.pins.as_ref().is_some_and(|pins| pins.contains(id))
    }

    pub fn collection(&self) -> &FetchHandle<E> {
        &self.collection
    }

    /// The current candidate collection: fetched data, or the hydration
    /// snapshot until something was fetched.
    pub async fn candidates(&self) -> Arc<Vec<E>> {
        match self.collection.state().await.data {
            Some(data) => data,
            None => Arc::clone(&self.initial),
        }
    }

    /// Pinned candidates in pin order.
    pub async fn pinned_view(&self) -> Vec<E> {
        let Some(pins) = &self.pins else {
            return Vec::new();
        };
        let candidates = self.candidates().await;
        pins.view(&candidates).into_iter().cloned().collect()
    }

    /// Re-fetch the candidate collection.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        self.collection.refresh().await
    }

    /// Pin or unpin `entity`.
    ///
    /// Returns the save task, or `None` if the list did not change.
    pub fn toggle_pinned(
        &mut self,
        entity: &E,
        should_pin: bool,
    ) -> Result<Option<PersistTask>, PinError> {
        self.apply_toggle(entity.id(), should_pin)
    }

    /// Pin or unpin by ID.
    ///
    /// Pinning requires the ID to be in the current collection. Unpinning
    /// does not, so pins of agents that went away can still be removed.
    pub async fn toggle_pinned_id(
        &mut self,
        id: EntityId,
        should_pin: bool,
    ) -> Result<Option<PersistTask>, PinError> {
        if self.pins.is_none() {
            return Err(PinError::NotHydrated);
        }
        if should_pin && !self.is_pinned(id) {
            let candidates = self.candidates().await;
            if !candidates.iter().any(|candidate| candidate.id() == id) {
                return Err(PinError::UnknownEntity(id));
            }
        }
        self.apply_toggle(id, should_pin)
    }

    fn apply_toggle(
        &mut self,
        id: EntityId,
        should_pin: bool,
    ) -> Result<Option<PersistTask>, PinError> {
        let runtime = Handle::try_current().map_err(|_| PinError::NoRuntime)?;
        let pins = self.pins.as_mut().ok_or(PinError::NotHydrated)?;
        if !pins.toggle(id, should_pin) {
            debug!(id, should_pin, "pin toggle left list unchanged");
            return Ok(None);
        }
        Ok(Some(self.persist(&runtime)))
    }

    /// Replace the whole pinned order, keeping the first occurrence of each ID.
    pub fn set_pinned(&mut self, ids: Vec<EntityId>) -> Result<Option<PersistTask>, PinError> {
        let runtime = Handle::try_current().map_err(|_| PinError::NoRuntime)?;
        let pins = self.pins.as_mut().ok_or(PinError::NotHydrated)?;
        if !pins.replace(ids) {
            debug!("pinned order unchanged");
            return Ok(None);
        }
        Ok(Some(self.persist(&runtime)))
    }

    /// The candidate named by the scope's `focus_param`, if it is in the
    /// current collection.
    pub async fn current_focused(&self, scope: &ScopeParams, focus_param: &str) -> Option<E> {
        let id = scope.focused_id(focus_param)?;
        let candidates = self.candidates().await;
        candidates.iter().find(|c| c.id() == id).cloned()
    }

    fn persist(&self, runtime: &Handle) -> PersistTask {
        let ordered_ids = self.pinned_ids().to_vec();
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(Event::PinnedChanged {
                ordered_ids: ordered_ids.clone(),
            });
        }

        let backend = Arc::clone(&self.backend);
        let path = self.pinned_path.clone();
        let events_tx = self.events_tx.clone();

        PersistTask::spawn(runtime, &self.pending, move |task_id| async move {
            let body = serde_json::to_value(PinnedOrderRequest {
                ordered_ids: ordered_ids.clone(),
            })
            .map_err(|e| PersistError::PinnedOrder(BackendError::Request(e.to_string())))?;

            match backend.patch_json(&path, body).await {
                Ok(()) => {
                    debug!(%task_id, count = ordered_ids.len(), "pinned order saved");
                    if let Some(tx) = &events_tx {
                        let _ = tx.send(Event::PinnedPersisted {
                            task_id,
                            ordered_ids,
                        });
                    }
                    Ok(())
                }
                Err(source) => {
                    let error = PersistError::PinnedOrder(source);
                    warn!(%task_id, error = %error, "pinned order save failed");
                    if let Some(tx) = &events_tx {
                        let _ = tx.send(Event::PinnedPersistFailed {
                            task_id,
                            error: error.to_string(),
                        });
                    }
                    Err(error)
                }
            }
        })
    }
}
