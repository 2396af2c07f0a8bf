//! Scrolling star field
//!
//! Two screen-sized star tiles stacked vertically, drifting down at one
//! unit per tick. When a tile scrolls half a screen past the bottom it
//! jumps two screen heights up, so the pair leapfrogs forever.

use crate::ecs::{
    AnimationState, Background, ComponentKind, ComponentStore, Phase, PhaseControl, Position,
    SheetId, Sprite, System, Velocity,
};
use crate::tuning::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

pub struct BackgroundSystem;

impl BackgroundSystem {
    pub fn new() -> Self {
        Self
    }

    fn spawn_tile(store: &mut ComponentStore, y: f32) {
        let entity = store.create_entity();
        store.backgrounds.insert(entity, Background);
        store.positions.insert(
            entity,
            Position {
                x: PLAYFIELD_WIDTH / 2.0,
                y,
            },
        );
        store.velocities.insert(entity, Velocity { vx: 0.0, vy: 1.0 });
        store.sprites.insert(
            entity,
            Sprite::new(SheetId::Background, PLAYFIELD_WIDTH / 256.0),
        );
        store
            .animation_states
            .insert(entity, AnimationState::looping(25));
    }
}

impl System for BackgroundSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn startup(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl) {
        Self::spawn_tile(store, PLAYFIELD_HEIGHT / 2.0);
        Self::spawn_tile(store, PLAYFIELD_HEIGHT / 2.0 - PLAYFIELD_HEIGHT);
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        for entity in store.view(&[ComponentKind::Background, ComponentKind::Position]) {
            if let Some(position) = store.positions.get_mut(entity) {
                if position.y >= PLAYFIELD_HEIGHT + PLAYFIELD_HEIGHT / 2.0 {
                    position.y -= PLAYFIELD_HEIGHT * 2.0;
                }
            }
        }
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::Background]) {
            store.remove_entity(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_stacks_two_tiles() {
        let mut store = ComponentStore::new();
        BackgroundSystem::new().startup(&mut store, &mut PhaseControl::default());

        let tiles = store.view(&[ComponentKind::Background, ComponentKind::Position]);
        assert_eq!(tiles.len(), 2);
        let gap = store.positions.get(tiles[0]).unwrap().y
            - store.positions.get(tiles[1]).unwrap().y;
        assert_eq!(gap, PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_tile_wraps_after_scrolling_off_the_bottom() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let mut system = BackgroundSystem::new();
        system.startup(&mut store, &mut phases);

        let tile = store.view(&[ComponentKind::Background])[0];
        store.positions.get_mut(tile).unwrap().y =
            PLAYFIELD_HEIGHT + PLAYFIELD_HEIGHT / 2.0;

        system.update(&mut store, &mut phases, 0);
        assert_eq!(
            store.positions.get(tile).unwrap().y,
            PLAYFIELD_HEIGHT / 2.0 - PLAYFIELD_HEIGHT
        );
    }
}
