//! Agent (persona) models returned by the `/persona` collection.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entity_models::{Entity, EntityId};

/// Lightweight snapshot of an agent as listed by the backend.
///
/// Only the fields the client reasons about are modelled; any other
/// attributes in the payload are ignored during deserialization.
///
/// # Example
///
/// ```json
/// {
///   "id": 3,
///   "name": "Research Assistant",
///   "description": "Answers questions from indexed documents",
///   "is_default_persona": true,
///   "is_visible": true,
///   "display_priority": 1
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct MinimalPersonaSnapshot {
    /// Server-assigned agent ID.
    pub id: EntityId,

    /// Display name.
    pub name: String,

    /// Short description shown under the name.
    #[serde(default)]
    pub description: String,

    /// Whether this agent is part of the default pin set for users that
    /// never chose their own.
    #[serde(default)]
    pub is_default_persona: bool,

    /// Hidden agents stay selectable by ID but are not listed by default.
    #[serde(default = "default_visible")]
    pub is_visible: bool,

    /// Optional ordering hint assigned by administrators.
    #[serde(default)]
    pub display_priority: Option<i32>,
}

fn default_visible() -> bool {
    true
}

impl Entity for MinimalPersonaSnapshot {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_default_eligible(&self) -> bool {
        self.is_default_persona
    }
}
