//! Collision detection
//!
//! Rebuilds every `CollidingWith` component from scratch each tick:
//! snapshot the previous tick's pairs, clear the column synchronously
//! (the one sanctioned use of immediate removal - the rebuild must not
//! fight the deferred queue), then run the O(n^2) pair scan. A contact
//! is `is_new` only if the ordered pair did not overlap last tick.
//!
//! Overlap predicate: strict `<` on squared distance, no epsilon. The
//! pair scan is quadratic over collidable entities, which is fine at
//! arcade entity counts; a spatial partition would be a pure
//! optimization and must preserve this exact predicate.

use crate::ecs::{
    CollidingWith, CollisionGroup, ComponentKind, ComponentStore, Contact, EntityId, Phase,
    PhaseControl, System,
};
use std::collections::HashSet;

pub struct CollisionDetectionSystem;

impl CollisionDetectionSystem {
    pub fn new() -> Self {
        Self
    }

    fn overlaps(a: &Body, b: &Body) -> bool {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        let reach = a.radius + b.radius;
        a.entity != b.entity && dx * dx + dy * dy < reach * reach
    }
}

struct Body {
    entity: EntityId,
    x: f32,
    y: f32,
    radius: f32,
    group: CollisionGroup,
}

impl System for CollisionDetectionSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        // Ordered pairs that already overlapped last tick.
        let mut previous: HashSet<(EntityId, EntityId)> = HashSet::new();
        for (entity, colliding) in store.colliding_withs.iter() {
            for contact in &colliding.contacts {
                previous.insert((entity, contact.other));
            }
        }

        store.clear_kind_now(ComponentKind::CollidingWith);

        let bodies: Vec<Body> = store
            .view(&[ComponentKind::Position, ComponentKind::CollisionRadius])
            .into_iter()
            .filter_map(|entity| {
                let position = store.positions.get(entity)?;
                let volume = store.collision_radii.get(entity)?;
                Some(Body {
                    entity,
                    x: position.x,
                    y: position.y,
                    radius: volume.radius,
                    group: volume.group,
                })
            })
            .collect();

        // First-seen order, like the rest of the store's columns.
        let mut fresh: Vec<(EntityId, Vec<Contact>)> = Vec::new();
        for a in &bodies {
            for b in &bodies {
                if Self::overlaps(a, b) {
                    let contact = Contact {
                        other: b.entity,
                        group: b.group,
                        is_new: !previous.contains(&(a.entity, b.entity)),
                    };
                    match fresh.iter_mut().find(|(entity, _)| *entity == a.entity) {
                        Some((_, contacts)) => contacts.push(contact),
                        None => fresh.push((a.entity, vec![contact])),
                    }
                }
            }
        }

        for (entity, contacts) in fresh {
            store.colliding_withs.insert(entity, CollidingWith { contacts });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{CollisionRadius, Position};

    fn add_body(
        store: &mut ComponentStore,
        x: f32,
        y: f32,
        radius: f32,
        group: CollisionGroup,
    ) -> EntityId {
        let entity = store.create_entity();
        store.positions.insert(entity, Position { x, y });
        store
            .collision_radii
            .insert(entity, CollisionRadius { radius, group });
        entity
    }

    #[test]
    fn test_overlap_is_strict_on_squared_distance() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        // Exactly touching: distance == r1 + r2 must NOT collide.
        let a = add_body(&mut store, 0.0, 0.0, 10.0, CollisionGroup::Player);
        let b = add_body(&mut store, 30.0, 0.0, 20.0, CollisionGroup::Enemy);

        CollisionDetectionSystem::new().update(&mut store, &mut phases, 0);
        assert!(!store.colliding_withs.contains(a));
        assert!(!store.colliding_withs.contains(b));
    }

    #[test]
    fn test_is_new_only_on_first_consecutive_overlap() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let a = add_body(&mut store, 0.0, 0.0, 10.0, CollisionGroup::PlayerLaser);
        let b = add_body(&mut store, 5.0, 0.0, 10.0, CollisionGroup::Enemy);

        let mut system = CollisionDetectionSystem::new();
        system.update(&mut store, &mut phases, 0);

        let contacts = &store.colliding_withs.get(a).unwrap().contacts;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].other, b);
        assert_eq!(contacts[0].group, CollisionGroup::Enemy);
        assert!(contacts[0].is_new);

        // Still overlapping next tick: recorded again, no longer new.
        system.update(&mut store, &mut phases, 1);
        let contacts = &store.colliding_withs.get(a).unwrap().contacts;
        assert!(!contacts[0].is_new);

        // Separate for a tick, then overlap again: new again.
        store.positions.get_mut(b).unwrap().x = 100.0;
        system.update(&mut store, &mut phases, 2);
        assert!(!store.colliding_withs.contains(a));

        store.positions.get_mut(b).unwrap().x = 5.0;
        system.update(&mut store, &mut phases, 3);
        assert!(store.colliding_withs.get(a).unwrap().contacts[0].is_new);
    }

    #[test]
    fn test_contacts_are_symmetric() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let a = add_body(&mut store, 0.0, 0.0, 10.0, CollisionGroup::Player);
        let b = add_body(&mut store, 5.0, 5.0, 10.0, CollisionGroup::EnemyLaser);

        CollisionDetectionSystem::new().update(&mut store, &mut phases, 0);

        assert_eq!(store.colliding_withs.get(a).unwrap().contacts[0].other, b);
        assert_eq!(store.colliding_withs.get(b).unwrap().contacts[0].other, a);
    }
}
