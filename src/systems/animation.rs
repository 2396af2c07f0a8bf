//! Sprite animation
//!
//! Advances sprite frames on a per-entity cadence. A one-shot animation
//! (explosions) marks itself complete at its pause frame and, if asked,
//! removes its whole entity through the deferred queue.

use crate::ecs::{ComponentKind, ComponentStore, PhaseControl, System};

pub struct SpriteAnimateSystem;

impl SpriteAnimateSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for SpriteAnimateSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, frame: u64) {
        for entity in store.view(&[ComponentKind::AnimationState, ComponentKind::Sprite]) {
            let Some(state) = store.animation_states.get_mut(entity) else {
                continue;
            };
            if !state.animate {
                continue;
            }

            let current_frame = store.sprites.get(entity).map(|sprite| sprite.frame);
            let Some(current_frame) = current_frame else {
                continue;
            };

            match state.pause_after_frame {
                Some(pause) if current_frame >= pause => {
                    state.complete = true;
                    if state.delete_after_complete {
                        store.remove_entity(entity);
                    }
                }
                _ => {
                    if frame % state.frame_delay == 0 {
                        if let Some(sprite) = store.sprites.get_mut(entity) {
                            sprite.frame += 1;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{AnimationState, SheetId, Sprite};

    fn animated_entity(store: &mut ComponentStore, state: AnimationState) -> crate::ecs::EntityId {
        let entity = store.create_entity();
        store.sprites.insert(entity, Sprite::new(SheetId::Explosion, 5.0));
        store.animation_states.insert(entity, state);
        entity
    }

    #[test]
    fn test_frames_advance_on_the_delay_cadence() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let entity = animated_entity(&mut store, AnimationState::looping(3));

        let mut system = SpriteAnimateSystem::new();
        for frame in 0..7 {
            system.update(&mut store, &mut phases, frame);
        }
        // Advances at frames 0, 3 and 6.
        assert_eq!(store.sprites.get(entity).unwrap().frame, 3);
    }

    #[test]
    fn test_one_shot_completes_and_removes_entity() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let entity = animated_entity(&mut store, AnimationState::one_shot(1, 2));

        let mut system = SpriteAnimateSystem::new();
        // Two passes reach the pause frame, the third completes it.
        for frame in 0..2 {
            system.update(&mut store, &mut phases, frame);
        }
        assert_eq!(store.sprites.get(entity).unwrap().frame, 2);

        system.update(&mut store, &mut phases, 2);
        assert!(store.animation_states.get(entity).unwrap().complete);
        store.flush_removals();
        assert!(store.kinds_of(entity).is_empty());
    }

    #[test]
    fn test_paused_animation_does_not_advance() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let mut state = AnimationState::looping(1);
        state.animate = false;
        let entity = animated_entity(&mut store, state);

        SpriteAnimateSystem::new().update(&mut store, &mut phases, 0);
        assert_eq!(store.sprites.get(entity).unwrap().frame, 0);
    }
}
