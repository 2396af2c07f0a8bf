//! Laser lifecycle
//!
//! Lasers spend themselves on the first relevant hit (player lasers on
//! enemies, enemy lasers on players) and are culled once they leave the
//! playfield vertically. Damage itself is handled by the systems that
//! own the hit entities; this one only retires the bolt.

use crate::ecs::{
    CollisionGroup, ComponentKind, ComponentStore, Phase, PhaseControl, System,
};
use crate::tuning::PLAYFIELD_HEIGHT;

pub struct LaserSystem;

impl LaserSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for LaserSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        for entity in store.view(&[
            ComponentKind::Laser,
            ComponentKind::CollisionRadius,
            ComponentKind::CollidingWith,
        ]) {
            let Some(volume) = store.collision_radii.get(entity) else {
                continue;
            };
            let Some(colliding) = store.colliding_withs.get(entity) else {
                continue;
            };
            let spent = colliding.contacts.iter().any(|contact| {
                (contact.group == CollisionGroup::Enemy
                    && volume.group == CollisionGroup::PlayerLaser)
                    || (contact.group == CollisionGroup::Player
                        && volume.group == CollisionGroup::EnemyLaser)
            });
            if spent {
                store.remove_entity(entity);
            }
        }

        for entity in store.view(&[
            ComponentKind::Laser,
            ComponentKind::Position,
            ComponentKind::CollisionRadius,
        ]) {
            let (Some(position), Some(volume)) = (
                store.positions.get(entity),
                store.collision_radii.get(entity),
            ) else {
                continue;
            };
            if position.y < -volume.radius || position.y > PLAYFIELD_HEIGHT + volume.radius {
                store.remove_entity(entity);
            }
        }
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::Laser]) {
            store.remove_entity(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{
        CollidingWith, CollisionRadius, Contact, EntityId, Laser, Position,
    };

    fn add_laser(store: &mut ComponentStore, group: CollisionGroup, y: f32) -> EntityId {
        let source = store.create_entity();
        let entity = store.create_entity();
        store.lasers.insert(entity, Laser { source });
        store.positions.insert(entity, Position { x: 400.0, y });
        store
            .collision_radii
            .insert(entity, CollisionRadius { radius: 20.0, group });
        entity
    }

    fn contact(store: &mut ComponentStore, laser: EntityId, group: CollisionGroup) {
        let other = store.create_entity();
        store.colliding_withs.insert(
            laser,
            CollidingWith {
                contacts: vec![Contact {
                    other,
                    group,
                    is_new: true,
                }],
            },
        );
    }

    #[test]
    fn test_player_laser_is_spent_on_an_enemy_hit() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let laser = add_laser(&mut store, CollisionGroup::PlayerLaser, 500.0);
        contact(&mut store, laser, CollisionGroup::Enemy);

        LaserSystem::new().update(&mut store, &mut phases, 0);
        store.flush_removals();
        assert!(!store.lasers.contains(laser));
    }

    #[test]
    fn test_laser_ignores_hits_from_its_own_side() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let laser = add_laser(&mut store, CollisionGroup::PlayerLaser, 500.0);
        contact(&mut store, laser, CollisionGroup::Player);

        LaserSystem::new().update(&mut store, &mut phases, 0);
        store.flush_removals();
        assert!(store.lasers.contains(laser));
    }

    #[test]
    fn test_offscreen_lasers_are_culled_both_directions() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let above = add_laser(&mut store, CollisionGroup::PlayerLaser, -21.0);
        let below = add_laser(&mut store, CollisionGroup::EnemyLaser, PLAYFIELD_HEIGHT + 21.0);
        let alive = add_laser(&mut store, CollisionGroup::PlayerLaser, 500.0);

        LaserSystem::new().update(&mut store, &mut phases, 0);
        store.flush_removals();

        assert!(!store.lasers.contains(above));
        assert!(!store.lasers.contains(below));
        assert!(store.lasers.contains(alive));
    }
}
