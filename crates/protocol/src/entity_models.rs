//! Entity abstraction shared by every server-owned collection.
//!
//! Personas, user groups and LLM providers are all records with a stable
//! integer ID and a display name. The client never mutates them; it only
//! selects, pins and filters them by ID.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Server-assigned entity identifier.
pub type EntityId = i64;

/// ID reserved for the synthetic "none" entity.
///
/// It is never part of a derived default pin set.
pub const SENTINEL_ENTITY_ID: EntityId = 0;

/// A server-owned record that can appear in a candidate collection.
pub trait Entity {
    /// Stable, unique identifier assigned by the backend.
    fn id(&self) -> EntityId;

    /// Human-readable display name.
    fn name(&self) -> &str;

    /// Whether the backend flags this entity for automatic inclusion in the
    /// default pin set.
    fn is_default_eligible(&self) -> bool {
        false
    }
}

/// Minimal `{id, name}` record used by the generic multi-select.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GenericItem {
    pub id: EntityId,
    pub name: String,
}

impl GenericItem {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entity for GenericItem {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
