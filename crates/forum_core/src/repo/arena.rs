//! Arena and parent→children index used by `MemoryForumStore`.
//!
//! # Invariants
//! - Arena iteration follows insertion order.
//! - `index` maps exactly the ids whose slot is occupied.
//! - Vacated slots never outnumber occupied ones; removal compacts the
//!   slot vector and rebuilds `index` once they would.

use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<(Uuid, T)>>,
    index: HashMap<Uuid, usize>,
    vacant: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            vacant: 0,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    /// Stores `value` under `id`. Returns `false` and keeps the arena
    /// unchanged when `id` is already occupied.
    pub(crate) fn insert(&mut self, id: Uuid, value: T) -> bool {
        if self.contains(id) {
            return false;
        }
        self.index.insert(id, self.slots.len());
        self.slots.push(Some((id, value)));
        true
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<&T> {
        let slot = *self.index.get(&id)?;
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .map(|(_, value)| value)
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        let slot = *self.index.get(&id)?;
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .map(|(_, value)| value)
    }

    pub(crate) fn remove(&mut self, id: Uuid) -> Option<T> {
        let slot = self.index.remove(&id)?;
        let (_, value) = self.slots.get_mut(slot).and_then(Option::take)?;
        self.vacant += 1;
        if self.vacant * 2 > self.slots.len() {
            self.compact();
        }
        Some(value)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten().map(|(_, value)| value)
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (slot, (id, _)) in self.slots.iter().flatten().enumerate() {
            self.index.insert(*id, slot);
        }
        self.vacant = 0;
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// One foreign-key relation, indexed from parent id to child ids.
#[derive(Debug, Default)]
pub(crate) struct ChildIndex {
    by_parent: HashMap<Uuid, Vec<Uuid>>,
}

impl ChildIndex {
    pub(crate) fn link(&mut self, parent: Uuid, child: Uuid) {
        self.by_parent.entry(parent).or_default().push(child);
    }

    pub(crate) fn unlink(&mut self, parent: Uuid, child: Uuid) {
        if let Some(children) = self.by_parent.get_mut(&parent) {
            children.retain(|id| *id != child);
            if children.is_empty() {
                self.by_parent.remove(&parent);
            }
        }
    }

    /// Moves `child` between parents; no-op when the parent is unchanged.
    pub(crate) fn relink(&mut self, old_parent: Uuid, new_parent: Uuid, child: Uuid) {
        if old_parent != new_parent {
            self.unlink(old_parent, child);
            self.link(new_parent, child);
        }
    }

    /// Detaches and returns every child of `parent`.
    pub(crate) fn take(&mut self, parent: Uuid) -> Vec<Uuid> {
        self.by_parent.remove(&parent).unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn children(&self, parent: Uuid) -> &[Uuid] {
        self.by_parent.get(&parent).map_or(&[], Vec::as_slice)
    }
}
