//! Component Columns
//!
//! One `Column<T>` holds every instance of a single component kind, in
//! insertion order, with an id index for O(1) lookup. Insertion order
//! matters: views are ordered by the first requested kind's column, so
//! a respawned player whose `Position` was re-added joins at the back
//! of the `Position` column.
//!
//! Invariant: at most one instance per entity. Inserting a duplicate is
//! a contract violation (a logic bug in a system) and panics rather
//! than silently dropping data.

use super::entity::EntityId;
use super::store::ComponentKind;
use std::collections::HashMap;

/// Insertion-ordered storage for a single component kind.
pub struct Column<T> {
    kind: ComponentKind,
    /// (owner, component) pairs in insertion order
    entries: Vec<(EntityId, T)>,
    /// owner -> position in `entries`
    index: HashMap<EntityId, usize>,
}

impl<T> Column<T> {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Attach a component to an entity. The component is visible to any
    /// query issued afterwards, including later in the same tick.
    ///
    /// # Panics
    ///
    /// Panics if the entity already has a component of this kind.
    pub fn insert(&mut self, entity: EntityId, component: T) {
        if self.index.contains_key(&entity) {
            panic!(
                "attempt to add a second {:?} component to entity {}",
                self.kind, entity
            );
        }
        self.index.insert(entity, self.entries.len());
        self.entries.push((entity, component));
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.index.get(&entity).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        let i = *self.index.get(&entity)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.index.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (owner, component) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(e, c)| (*e, c))
    }

    /// Iterate mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(e, c)| (*e, c))
    }

    /// Owner ids in insertion order, as an owned snapshot. Handy when a
    /// system needs to mutate the store while walking a result set.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|(e, _)| *e).collect()
    }

    /// Remove an entity's component right now, preserving the order of
    /// the remaining entries. No-op if the entity has none.
    pub(crate) fn remove_now(&mut self, entity: EntityId) -> Option<T> {
        let pos = self.index.remove(&entity)?;
        let (_, component) = self.entries.remove(pos);
        // Entries after the removed slot shifted down by one.
        for (owner, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(owner) {
                *slot -= 1;
            }
        }
        Some(component)
    }

    /// Drop every instance of this kind right now.
    pub(crate) fn clear_now(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Kind-erased view of a column, letting the store dispatch removals,
/// stats, and presence checks over its whole roster without a match arm
/// per call site.
pub(crate) trait AnyColumn {
    fn len(&self) -> usize;
    fn contains(&self, entity: EntityId) -> bool;
    fn entity_ids(&self) -> Vec<EntityId>;
    fn remove_id(&mut self, entity: EntityId);
    fn clear(&mut self);
}

impl<T> AnyColumn for Column<T> {
    fn len(&self) -> usize {
        self.len()
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.contains(entity)
    }

    fn entity_ids(&self) -> Vec<EntityId> {
        self.entity_ids()
    }

    fn remove_id(&mut self, entity: EntityId) {
        self.remove_now(entity);
    }

    fn clear(&mut self) {
        self.clear_now();
    }
}
