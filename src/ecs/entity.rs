//! Entity Identifiers
//!
//! Entities are opaque integer ids grouping zero or more components.
//! Ids are handed out in strictly increasing order and are never reused
//! or reclaimed: a reference to a long-dead laser can never accidentally
//! match a freshly spawned enemy. An entity "exists" only in the sense
//! that at least one component carries its id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a game entity.
///
/// Plain 64-bit value; at one entity per frame it would take half a
/// billion years of play to wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Construct from a raw id. Only the allocator (and tests) should
    /// mint new ids.
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out fresh entity ids. Never blocks, never fails, never reuses.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u64,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate a fresh, strictly increasing id.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next);
        self.next += 1;
        id
    }

    /// Total number of ids ever issued.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_from_zero() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.allocate().raw(), 0);
        assert_eq!(alloc.allocate().raw(), 1);
        assert_eq!(alloc.allocate().raw(), 2);
        assert_eq!(alloc.issued(), 3);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut alloc = EntityAllocator::new();
        let first = alloc.allocate();
        // "Destroying" an entity is purely a component-level affair;
        // the allocator keeps counting upward regardless.
        let second = alloc.allocate();
        assert_ne!(first, second);
        assert!(second.raw() > first.raw());
    }
}
