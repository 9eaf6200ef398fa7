//! Notification protocol.
//!
//! The core never pushes data back into a UI directly. Instead it emits
//! `Event`s on an optional channel so front ends can show non-blocking
//! notices (a failed save, a refreshed list) and redraw.
//!
//! Uses tagged enum serialization for TypeScript compatibility:
//! ```json
//! {
//!   "type": "pinnedPersistFailed",
//!   "payload": {
//!     "task_id": "uuid-here",
//!     "error": "server returned 500"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::entity_models::EntityId;

/// Events sent from the core to whoever renders its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A collection fetch succeeded and its cache entry was replaced.
    CollectionRefreshed { key: String, count: usize },

    /// A collection fetch failed; the previous data (if any) is still served.
    CollectionFetchFailed { key: String, error: String },

    /// The local pinned list changed. Emitted before the save is confirmed.
    PinnedChanged { ordered_ids: Vec<EntityId> },

    /// A pinned-order save finished successfully.
    PinnedPersisted {
        #[ts(type = "string")]
        task_id: Uuid,
        ordered_ids: Vec<EntityId>,
    },

    /// A pinned-order save failed. Local state is left untouched.
    PinnedPersistFailed {
        #[ts(type = "string")]
        task_id: Uuid,
        error: String,
    },

    /// Saving an agent's preferences failed. Local state is left untouched.
    PreferencePersistFailed { agent_id: EntityId, error: String },
}
