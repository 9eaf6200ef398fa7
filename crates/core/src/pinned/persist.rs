//! Background persistence tasks.
//!
//! Every local mutation that must reach the backend is saved by a spawned
//! task. Tasks are never cancelled or serialized against each other, and
//! their outcome never flows back into local state. Callers may keep the
//! returned `PersistTask` to await the result or drop it to fire and forget.

use crate::backend::BackendError;
use ak_protocol::EntityId;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("Failed to save pinned order: {0}")]
    PinnedOrder(BackendError),
    #[error("Failed to save preferences for agent {agent_id}: {source}")]
    Preference {
        agent_id: EntityId,
        source: BackendError,
    },
    #[error("Persist task did not complete: {0}")]
    Aborted(String),
}

/// Counts persist tasks that have not finished yet.
#[derive(Debug, Clone, Default)]
pub struct PendingCounter(Arc<AtomicUsize>);

impl PendingCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn enter(&self) -> PendingGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        PendingGuard(Arc::clone(&self.0))
    }
}

/// Decrements the counter when the task ends, even if it panics.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle to one spawned save.
#[derive(Debug)]
pub struct PersistTask {
    id: Uuid,
    handle: JoinHandle<Result<(), PersistError>>,
}

impl PersistTask {
    /// Spawn `make(task_id)` on `runtime`, tracked by `pending`.
    pub(crate) fn spawn<F, Fut>(runtime: &Handle, pending: &PendingCounter, make: F) -> Self
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = Result<(), PersistError>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let guard = pending.enter();
        let fut = make(id);
        let handle = runtime.spawn(async move {
            let _guard = guard;
            fut.await
        });
        Self { id, handle }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the save to finish.
    pub async fn wait(self) -> Result<(), PersistError> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_error) => Err(PersistError::Aborted(join_error.to_string())),
        }
    }
}
