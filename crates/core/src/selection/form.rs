//! Form state holding selection-set fields.
//!
//! Selection sets are form-bound: editing them only changes local state, and
//! the whole form is sent when the user submits it.

use crate::selection::set::SelectionSet;
use ak_protocol::{EntityId, LlmProviderDescriptor};
use serde::{Deserialize, Serialize};

/// The multi-select fields of the provider access form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessField {
    Personas,
    Groups,
}

/// Access restrictions of one LLM provider being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmProviderAccessForm {
    pub is_public: bool,
    pub groups: SelectionSet,
    pub personas: SelectionSet,
}

impl LlmProviderAccessForm {
    /// Start editing from a provider's current restrictions.
    pub fn from_provider(provider: &LlmProviderDescriptor) -> Self {
        Self {
            is_public: provider.is_public,
            groups: SelectionSet::from(provider.groups.clone()),
            personas: SelectionSet::from(provider.personas.clone()),
        }
    }

    pub fn field(&self, field: AccessField) -> &SelectionSet {
        match field {
            AccessField::Personas => &self.personas,
            AccessField::Groups => &self.groups,
        }
    }

    pub fn field_mut(&mut self, field: AccessField) -> &mut SelectionSet {
        match field {
            AccessField::Personas => &mut self.personas,
            AccessField::Groups => &mut self.groups,
        }
    }

    /// Add `id` to `field`; no-op if already selected.
    pub fn select(&mut self, field: AccessField, id: EntityId) -> bool {
        self.field_mut(field).select(id)
    }

    /// Remove `id` from `field`; no-op if absent.
    pub fn remove(&mut self, field: AccessField, id: EntityId) -> bool {
        self.field_mut(field).remove(id)
    }
}
