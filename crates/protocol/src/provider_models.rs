//! LLM provider and user group models.
//!
//! Providers can be restricted to a set of user groups and a set of agents.
//! Access control itself lives on the server; these models only carry the
//! restriction lists so admin forms can edit them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entity_models::{Entity, EntityId};

/// Provider descriptor as listed by `/llm/provider`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct LlmProviderDescriptor {
    pub id: EntityId,

    pub name: String,

    /// Provider family, e.g. "openai" or "anthropic".
    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub default_model_name: String,

    #[serde(default)]
    pub is_default_provider: Option<bool>,

    /// Public providers are usable by everyone regardless of the
    /// restriction lists.
    #[serde(default)]
    pub is_public: bool,

    /// User group IDs allowed to use this provider.
    #[serde(default)]
    pub groups: Vec<EntityId>,

    /// Agent IDs allowed to use this provider.
    #[serde(default)]
    pub personas: Vec<EntityId>,
}

impl Entity for LlmProviderDescriptor {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_default_eligible(&self) -> bool {
        self.is_default_provider.unwrap_or(false)
    }
}

/// A user group as listed by the admin user-group endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct UserGroup {
    pub id: EntityId,
    pub name: String,
}

impl Entity for UserGroup {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
