//! Selection sets and the views derived from them.

use ak_protocol::{Entity, EntityId};
use serde::{Deserialize, Serialize};

/// The IDs chosen for one form field.
///
/// Membership is what matters; views derived from it always follow the
/// candidate collection's order. IDs whose entity is no longer a candidate
/// are kept, so the choice survives the entity disappearing and coming back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EntityId>", into = "Vec<EntityId>")]
pub struct SelectionSet {
    ids: Vec<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add `id`. Returns `false` if it was already selected.
    pub fn select(&mut self, id: EntityId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl From<Vec<EntityId>> for SelectionSet {
    fn from(ids: Vec<EntityId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.select(id);
        }
        set
    }
}

impl From<SelectionSet> for Vec<EntityId> {
    fn from(set: SelectionSet) -> Self {
        set.ids
    }
}

impl FromIterator<EntityId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.select(id);
        }
        set
    }
}

/// Candidates whose ID is selected, in candidate order.
///
/// Selected IDs without a matching candidate are skipped.
pub fn selected_view<'a, E: Entity>(candidates: &'a [E], selected: &SelectionSet) -> Vec<&'a E> {
    candidates
        .iter()
        .filter(|candidate| selected.contains(candidate.id()))
        .collect()
}

/// Candidates not yet selected, in candidate order.
pub fn unselected_view<'a, E: Entity>(
    candidates: &'a [E],
    selected: &SelectionSet,
) -> Vec<&'a E> {
    candidates
        .iter()
        .filter(|candidate| !selected.contains(candidate.id()))
        .collect()
}
