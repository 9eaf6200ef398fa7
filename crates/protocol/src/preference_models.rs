//! User preference payloads persisted by the backend.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::entity_models::EntityId;

/// Body of `PATCH /user/pinned-items`.
///
/// ```json
/// { "ordered_ids": [3, 1, 7] }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct PinnedOrderRequest {
    /// Full pinned list in display order.
    pub ordered_ids: Vec<EntityId>,
}

/// Per-agent settings chosen by the current user.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserSpecificAgentPreference {
    /// Tools the user switched off for this agent.
    #[serde(default)]
    pub disabled_tool_ids: Vec<EntityId>,
}

/// All per-agent preferences of the current user, keyed by agent ID.
pub type UserSpecificAgentPreferences = HashMap<EntityId, UserSpecificAgentPreference>;

/// Preferences section of the current user.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct UserPreferences {
    /// Explicit pin order. `None` means the user never chose one.
    #[serde(default)]
    pub pinned_assistants: Option<Vec<EntityId>>,
}

/// The subset of `GET /me` the client reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct CurrentUser {
    #[serde(default)]
    pub preferences: UserPreferences,
}
