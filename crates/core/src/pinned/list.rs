//! The ordered, deduplicated pinned list.

use ak_protocol::{Entity, EntityId, SENTINEL_ENTITY_ID};

/// Entity IDs in display-priority order. No ID appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedList {
    ids: Vec<EntityId>,
}

impl PinnedList {
    /// Build from `ids`, keeping the first occurrence of each.
    pub fn from_ids(ids: impl IntoIterator<Item = EntityId>) -> Self {
        let mut list = Self::default();
        for id in ids {
            list.pin(id);
        }
        list
    }

    /// The pin set for a user who never chose one: every default-eligible
    /// candidate except the sentinel, in candidate order.
    pub fn derive_default<E: Entity>(candidates: &[E]) -> Self {
        Self::from_ids(
            candidates
                .iter()
                .filter(|c| c.is_default_eligible() && c.id() != SENTINEL_ENTITY_ID)
                .map(Entity::id),
        )
    }

    /// Resolve an explicit ID list against `candidates`, keeping the given
    /// order and dropping IDs without a matching candidate.
    pub fn resolve<E: Entity>(explicit: &[EntityId], candidates: &[E]) -> Self {
        Self::from_ids(
            explicit
                .iter()
                .copied()
                .filter(|id| candidates.iter().any(|c| c.id() == *id)),
        )
    }

    /// Initial list: resolved explicit choice if there is one, defaults otherwise.
    ///
    /// An explicit empty list is a choice and yields no pins.
    pub fn initial<E: Entity>(candidates: &[E], explicit: Option<&[EntityId]>) -> Self {
        match explicit {
            Some(ids) => Self::resolve(ids, candidates),
            None => Self::derive_default(candidates),
        }
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

    /// Pin (append) or unpin `id`. Returns whether the list changed.
    pub fn toggle(&mut self, id: EntityId, should_pin: bool) -> bool {
        if should_pin {
            self.pin(id)
        } else {
            self.unpin(id)
        }
    }

    /// Replace the whole order. Returns whether the list changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = EntityId>) -> bool {
        let next = Self::from_ids(ids);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }

    /// Pinned candidates in pin order. IDs with no current candidate are
    /// skipped but stay pinned.
    pub fn view<'a, E: Entity>(&self, candidates: &'a [E]) -> Vec<&'a E> {
        self.ids
            .iter()
            .filter_map(|id| candidates.iter().find(|c| c.id() == *id))
            .collect()
    }

    fn pin(&mut self, id: EntityId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    fn unpin(&mut self, id: EntityId) -> bool {
        match self.ids.iter().position(|pinned| *pinned == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }
}
