//! Player ships
//!
//! Owns the whole player lifecycle: spawning from the `StartGame`
//! request, respawn and spawn-invulnerability timers, movement and
//! firing from input components, death on enemy contact, and applying
//! queued score deltas. Player 0 flies on keyboard or pad 0, player 1
//! on pad 1.

use crate::ecs::{
    AnimationState, CollisionGroup, CollisionRadius, ComponentKind, ComponentStore, EntityId,
    Laser, PadButton, Phase, PhaseControl, PlaySoundEffect, Player, Position, SheetId, SoundId,
    Sprite, System, Velocity,
};
use crate::systems::input::{buttons_down, keys_down};
use crate::tuning::*;
use macroquad::prelude::KeyCode;
use std::collections::HashSet;

pub struct PlayerSystem;

impl PlayerSystem {
    pub fn new() -> Self {
        Self
    }

    fn spawn_x(number: usize, count: usize) -> f32 {
        (PLAYFIELD_WIDTH / 2.0) * number as f32 + PLAYFIELD_WIDTH / count as f32 / 2.0
    }

    fn spawn_y() -> f32 {
        PLAYFIELD_HEIGHT - 120.0
    }

    fn fire_laser(store: &mut ComponentStore, source: EntityId, x: f32, y: f32) {
        let laser = store.create_entity();
        store.lasers.insert(laser, Laser { source });
        store.positions.insert(laser, Position { x, y: y - 25.0 });
        store.velocities.insert(
            laser,
            Velocity {
                vx: 0.0,
                vy: PLAYER_LASER_SPEED,
            },
        );
        store.sprites.insert(laser, Sprite::new(SheetId::Laser, 5.0));
        store.collision_radii.insert(
            laser,
            CollisionRadius {
                radius: LASER_COLLISION_RADIUS,
                group: CollisionGroup::PlayerLaser,
            },
        );
        store
            .sound_requests
            .insert(laser, PlaySoundEffect { sound: SoundId::Laser });
    }

    fn spawn_explosion(store: &mut ComponentStore, x: f32, y: f32, vx: f32, vy: f32) {
        let explosion = store.create_entity();
        store.positions.insert(explosion, Position { x, y });
        store.velocities.insert(explosion, Velocity { vx, vy });
        store
            .sprites
            .insert(explosion, Sprite::new(SheetId::Explosion, 5.0));
        store
            .animation_states
            .insert(explosion, AnimationState::one_shot(3, 5));
        store.sound_requests.insert(
            explosion,
            PlaySoundEffect {
                sound: SoundId::Explosion,
            },
        );
    }

    /// Respawn countdowns and invulnerability flashing.
    fn handle_spawn(&mut self, store: &mut ComponentStore) {
        let view = store.view(&[ComponentKind::Player, ComponentKind::Sprite]);
        let count = view.len().max(1);

        for entity in view {
            let Some(player) = store.players.get_mut(entity) else {
                continue;
            };

            if player.respawn_timer > 0 {
                player.respawn_timer -= 1;
                if player.respawn_timer == 0 {
                    player.invulnerable_timer = PLAYER_SPAWN_INVULNERABILITY;
                    let number = player.number;
                    store.positions.insert(
                        entity,
                        Position {
                            x: Self::spawn_x(number, count),
                            y: Self::spawn_y(),
                        },
                    );
                }
            } else if player.invulnerable_timer > 0 {
                player.invulnerable_timer -= 1;
                let still_flashing = player.invulnerable_timer > 0;
                if let Some(sprite) = store.sprites.get_mut(entity) {
                    sprite.flash = still_flashing;
                }
            }
        }
    }

    /// Movement and firing from input components.
    fn handle_input(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[
            ComponentKind::Player,
            ComponentKind::Position,
            ComponentKind::Velocity,
        ]) {
            let Some(player) = store.players.get(entity).copied() else {
                continue;
            };
            let Some(position) = store.positions.get(entity).copied() else {
                continue;
            };

            // Player 0 gets the keyboard; everyone gets their own pad.
            let keys: HashSet<KeyCode> = if player.number == 0 {
                keys_down(store)
            } else {
                HashSet::new()
            };
            let buttons = buttons_down(store, player.number);

            let mut vx = 0.0;
            let mut vy = 0.0;
            if (keys.contains(&KeyCode::A) || buttons.contains(&PadButton::Left))
                && position.x > 40.0
            {
                vx -= PLAYER_SPEED;
            }
            if (keys.contains(&KeyCode::D) || buttons.contains(&PadButton::Right))
                && position.x < PLAYFIELD_WIDTH - 40.0
            {
                vx += PLAYER_SPEED;
            }
            if (keys.contains(&KeyCode::W) || buttons.contains(&PadButton::Up))
                && position.y > 50.0
            {
                vy -= PLAYER_SPEED;
            }
            if (keys.contains(&KeyCode::S) || buttons.contains(&PadButton::Down))
                && position.y < PLAYFIELD_HEIGHT - 120.0
            {
                vy += PLAYER_SPEED;
            }
            if let Some(velocity) = store.velocities.get_mut(entity) {
                velocity.vx = vx;
                velocity.vy = vy;
            }

            let wants_fire =
                keys.contains(&KeyCode::Space) || buttons.contains(&PadButton::Fire);
            if wants_fire && player.fire_cooldown == 0 {
                Self::fire_laser(store, entity, position.x, position.y);
                if let Some(player) = store.players.get_mut(entity) {
                    player.fire_cooldown = PLAYER_FIRE_COOLDOWN;
                }
            } else if let Some(player) = store.players.get_mut(entity) {
                player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
            }
        }
    }

    /// Death on fresh contact with an enemy or enemy laser.
    fn handle_collisions(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[
            ComponentKind::Player,
            ComponentKind::Position,
            ComponentKind::Velocity,
            ComponentKind::CollidingWith,
        ]) {
            let invulnerable = store
                .players
                .get(entity)
                .map(|player| player.invulnerable_timer > 0)
                .unwrap_or(true);
            if invulnerable {
                continue;
            }

            let contacts = store
                .colliding_withs
                .get(entity)
                .map(|colliding| colliding.contacts.clone())
                .unwrap_or_default();

            for contact in contacts {
                let lethal = matches!(
                    contact.group,
                    CollisionGroup::Enemy | CollisionGroup::EnemyLaser
                );
                if !(contact.is_new && lethal) {
                    continue;
                }

                let (Some(position), Some(velocity)) = (
                    store.positions.get(entity).copied(),
                    store.velocities.get(entity).copied(),
                ) else {
                    continue;
                };
                Self::spawn_explosion(
                    store,
                    position.x,
                    position.y,
                    velocity.vx,
                    velocity.vy,
                );

                let Some(player) = store.players.get_mut(entity) else {
                    continue;
                };
                if player.lives > 0 {
                    player.lives -= 1;
                    let respawning = player.lives > 0;
                    if respawning {
                        player.respawn_timer = PLAYER_RESPAWN_TIME;
                    }
                    // The ship vanishes until the respawn timer re-adds
                    // a Position (or forever, on the last life).
                    store.remove_component(ComponentKind::Position, entity);
                }
            }
        }
    }

    /// Apply queued score deltas, then clear the queue kind.
    fn update_score(&mut self, store: &mut ComponentStore) {
        let deltas: Vec<(EntityId, i64)> = store
            .score_deltas
            .iter()
            .map(|(_, modify)| (modify.player, modify.delta))
            .collect();
        for (player_entity, delta) in deltas {
            if let Some(player) = store.players.get_mut(player_entity) {
                player.score += delta;
            }
        }
        store.remove_all_instances(ComponentKind::ModifyScore);
    }
}

impl System for PlayerSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn startup(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl) {
        let Some((_, start)) = store.start_games.iter().next() else {
            // No StartGame request - nothing to spawn this round.
            return;
        };
        let count = start.players.max(1);
        store.remove_all_instances(ComponentKind::StartGame);

        for number in 0..count {
            let entity = store.create_entity();
            store.players.insert(
                entity,
                Player {
                    number,
                    score: 0,
                    lives: PLAYER_LIVES,
                    fire_cooldown: 0,
                    respawn_timer: 0,
                    invulnerable_timer: PLAYER_SPAWN_INVULNERABILITY,
                },
            );
            store.collision_radii.insert(
                entity,
                CollisionRadius {
                    radius: PLAYER_COLLISION_RADIUS,
                    group: CollisionGroup::Player,
                },
            );
            store.positions.insert(
                entity,
                Position {
                    x: Self::spawn_x(number, count),
                    y: Self::spawn_y(),
                },
            );
            store.velocities.insert(entity, Velocity::default());
            let mut sprite = Sprite::new(SheetId::Player, 6.0);
            sprite.flash = true;
            store.sprites.insert(entity, sprite);
            store
                .animation_states
                .insert(entity, AnimationState::looping(8));
        }
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        self.handle_spawn(store);
        self.handle_input(store);
        self.handle_collisions(store);
        self.update_score(store);
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::Player]) {
            store.remove_entity(entity);
        }
    }
}
