//! Movement
//!
//! Applies impulses first (finite-frame kicks that remove themselves),
//! then steady velocity. Mutates positions in place through the view.

use crate::ecs::{ComponentKind, ComponentStore, PhaseControl, System};

pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        for entity in store.view(&[ComponentKind::Position, ComponentKind::Impulse]) {
            let Some(impulse) = store.impulses.get_mut(entity) else {
                continue;
            };
            let (vx, vy) = (impulse.vx, impulse.vy);
            impulse.frames -= 1;
            let expired = impulse.frames <= 0;

            if let Some(position) = store.positions.get_mut(entity) {
                position.x += vx;
                position.y += vy;
            }
            if expired {
                store.remove_component(ComponentKind::Impulse, entity);
            }
        }

        for entity in store.view(&[ComponentKind::Position, ComponentKind::Velocity]) {
            let Some(velocity) = store.velocities.get(entity) else {
                continue;
            };
            let (vx, vy) = (velocity.vx, velocity.vy);
            if let Some(position) = store.positions.get_mut(entity) {
                position.x += vx;
                position.y += vy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Impulse, Position, Velocity};

    #[test]
    fn test_velocity_moves_position_one_step() {
        let mut store = ComponentStore::new();
        let e = store.create_entity();
        store.positions.insert(e, Position { x: 10.0, y: 20.0 });
        store.velocities.insert(e, Velocity { vx: 1.0, vy: -1.0 });

        MovementSystem::new().update(&mut store, &mut PhaseControl::default(), 0);

        let position = store.positions.get(e).unwrap();
        assert_eq!((position.x, position.y), (11.0, 19.0));
    }

    #[test]
    fn test_impulse_stacks_with_velocity_and_expires() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let e = store.create_entity();
        store.positions.insert(e, Position { x: 0.0, y: 100.0 });
        store.velocities.insert(e, Velocity { vx: 0.0, vy: 5.0 });
        store.impulses.insert(
            e,
            Impulse {
                vx: 0.0,
                vy: -15.0,
                frames: 2,
            },
        );

        let mut system = MovementSystem::new();
        system.update(&mut store, &mut phases, 0);
        // Impulse and velocity both applied this frame.
        assert_eq!(store.positions.get(e).unwrap().y, 90.0);
        assert!(store.impulses.contains(e));

        system.update(&mut store, &mut phases, 1);
        store.flush_removals();
        // Second frame spends the impulse; the deferred removal lands.
        assert_eq!(store.positions.get(e).unwrap().y, 80.0);
        assert!(!store.impulses.contains(e));

        system.update(&mut store, &mut phases, 2);
        assert_eq!(store.positions.get(e).unwrap().y, 85.0);
    }
}
