//! Enemy waves
//!
//! Spawns a random enemy type on a fixed cadence, reacts to laser hits
//! (pushback below lethal damage, explosion and score credit at zero
//! health), culls enemies that drift off the bottom, and fires enemy
//! lasers on a per-enemy cooldown. Score credit traces the killing
//! laser back to the player that fired it.

use crate::ecs::{
    AnimationState, CollisionGroup, CollisionRadius, ComponentKind, ComponentStore, Enemy,
    EntityId, Impulse, Laser, ModifyScore, Phase, PhaseControl, PlaySoundEffect, Position,
    SheetId, SoundId, Sprite, System, Velocity,
};
use crate::tuning::*;
use macroquad::rand::gen_range;

pub struct EnemySystem;

impl EnemySystem {
    pub fn new() -> Self {
        Self
    }

    fn spawn_enemy(store: &mut ComponentStore) {
        let (sheet, health, scale, points) = match gen_range(0, 3) {
            0 => (SheetId::Enemy1, 1, 3.0, 60),
            1 => (SheetId::Enemy2, 2, 3.0, 200),
            _ => (SheetId::Enemy3, 3, 5.0, 500),
        };
        let radius = 14.0 * scale;

        let entity = store.create_entity();
        store.enemies.insert(
            entity,
            Enemy {
                health,
                points,
                fire_cooldown: 0,
            },
        );
        store.collision_radii.insert(
            entity,
            CollisionRadius {
                radius,
                group: CollisionGroup::Enemy,
            },
        );
        store.positions.insert(
            entity,
            Position {
                x: gen_range(0.0, PLAYFIELD_WIDTH - radius * 2.0) + radius,
                y: -radius * 2.0,
            },
        );
        store.velocities.insert(
            entity,
            Velocity {
                vx: 0.0,
                vy: gen_range(3.0, 8.0),
            },
        );
        store.sprites.insert(entity, Sprite::new(sheet, scale));
        store
            .animation_states
            .insert(entity, AnimationState::looping(10));
    }

    fn blow_up(store: &mut ComponentStore, enemy: EntityId) {
        let (Some(position), Some(velocity)) = (
            store.positions.get(enemy).copied(),
            store.velocities.get(enemy).copied(),
        ) else {
            return;
        };

        let explosion = store.create_entity();
        store.positions.insert(explosion, Position { x: position.x, y: position.y });
        store
            .velocities
            .insert(explosion, Velocity { vx: velocity.vx, vy: velocity.vy });
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

        store.remove_entity(enemy);
    }

    fn handle_collisions(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[
            ComponentKind::Enemy,
            ComponentKind::Position,
            ComponentKind::Velocity,
            ComponentKind::CollidingWith,
            ComponentKind::AnimationState,
            ComponentKind::Sprite,
        ]) {
            let contacts = store
                .colliding_withs
                .get(entity)
                .map(|colliding| colliding.contacts.clone())
                .unwrap_or_default();

            let mut destroyed = false;
            for contact in contacts {
                match contact.group {
                    CollisionGroup::PlayerLaser => {
                        let Some(enemy) = store.enemies.get_mut(entity) else {
                            continue;
                        };
                        enemy.health -= 1;
                        if enemy.health == 0 {
                            // Credit whoever fired the killing laser.
                            let points = enemy.points;
                            if let Some(laser) = store.lasers.get(contact.other) {
                                let player = laser.source;
                                let credit = store.create_entity();
                                store.score_deltas.insert(
                                    credit,
                                    ModifyScore {
                                        player,
                                        delta: points,
                                    },
                                );
                            }
                            destroyed = true;
                        } else {
                            // Sub-lethal hit: kick the enemy back upward.
                            let base_vy = store
                                .velocities
                                .get(entity)
                                .map(|velocity| velocity.vy)
                                .unwrap_or(0.0);
                            if store.impulses.contains(entity) {
                                if let Some(impulse) = store.impulses.get_mut(entity) {
                                    impulse.vy -= ENEMY_PUSHBACK_VELOCITY;
                                    impulse.frames += ENEMY_PUSHBACK_FRAMES;
                                }
                            } else {
                                store.impulses.insert(
                                    entity,
                                    Impulse {
                                        vx: 0.0,
                                        vy: -base_vy - ENEMY_PUSHBACK_VELOCITY,
                                        frames: ENEMY_PUSHBACK_FRAMES,
                                    },
                                );
                            }
                        }
                    }
                    CollisionGroup::Player => destroyed = true,
                    _ => {}
                }
                if destroyed {
                    Self::blow_up(store, entity);
                    break;
                }
            }
        }
    }

    fn cull_offscreen(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[
            ComponentKind::Enemy,
            ComponentKind::Position,
            ComponentKind::CollisionRadius,
        ]) {
            let (Some(position), Some(volume)) = (
                store.positions.get(entity),
                store.collision_radii.get(entity),
            ) else {
                continue;
            };
            if position.y > PLAYFIELD_HEIGHT + volume.radius * 2.0 {
                store.remove_entity(entity);
            }
        }
    }

    fn fire_lasers(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::Enemy, ComponentKind::Position]) {
            let ready = store
                .enemies
                .get(entity)
                .map(|enemy| enemy.fire_cooldown == 0)
                .unwrap_or(false);

            if ready {
                let Some(position) = store.positions.get(entity).copied() else {
                    continue;
                };
                let laser = store.create_entity();
                store.lasers.insert(laser, Laser { source: entity });
                store.positions.insert(
                    laser,
                    Position {
                        x: position.x,
                        y: position.y + 25.0,
                    },
                );
                store.velocities.insert(
                    laser,
                    Velocity {
                        vx: 0.0,
                        vy: ENEMY_LASER_SPEED,
                    },
                );
                store.sprites.insert(laser, Sprite::new(SheetId::Laser, 5.0));
                store.collision_radii.insert(
                    laser,
                    CollisionRadius {
                        radius: LASER_COLLISION_RADIUS,
                        group: CollisionGroup::EnemyLaser,
                    },
                );
                if let Some(enemy) = store.enemies.get_mut(entity) {
                    enemy.fire_cooldown = ENEMY_FIRE_COOLDOWN;
                }
            } else if let Some(enemy) = store.enemies.get_mut(entity) {
                enemy.fire_cooldown -= 1;
            }
        }
    }
}

impl System for EnemySystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, frame: u64) {
        if frame % ENEMY_SPAWN_INTERVAL == 0 {
            Self::spawn_enemy(store);
        }
        self.handle_collisions(store);
        self.cull_offscreen(store);
        self.fire_lasers(store);
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::Enemy]) {
            store.remove_entity(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{CollidingWith, Contact};

    fn add_enemy(store: &mut ComponentStore, health: i32, points: i64) -> EntityId {
        let entity = store.create_entity();
        store.enemies.insert(
            entity,
            Enemy {
                health,
                points,
                fire_cooldown: 10,
            },
        );
        store.collision_radii.insert(
            entity,
            CollisionRadius {
                radius: 42.0,
                group: CollisionGroup::Enemy,
            },
        );
        store
            .positions
            .insert(entity, Position { x: 400.0, y: 300.0 });
        store
            .velocities
            .insert(entity, Velocity { vx: 0.0, vy: 4.0 });
        store
            .sprites
            .insert(entity, Sprite::new(SheetId::Enemy1, 3.0));
        store
            .animation_states
            .insert(entity, AnimationState::looping(10));
        entity
    }

    fn hit_by_laser(store: &mut ComponentStore, enemy: EntityId, source: EntityId) -> EntityId {
        let laser = store.create_entity();
        store.lasers.insert(laser, Laser { source });
        store.colliding_withs.insert(
            enemy,
            CollidingWith {
                contacts: vec![Contact {
                    other: laser,
                    group: CollisionGroup::PlayerLaser,
                    is_new: true,
                }],
            },
        );
        laser
    }

    #[test]
    fn test_sub_lethal_hit_applies_pushback_impulse() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let enemy = add_enemy(&mut store, 2, 200);
        let player = store.create_entity();
        hit_by_laser(&mut store, enemy, player);

        EnemySystem::new().update(&mut store, &mut phases, 1);

        assert_eq!(store.enemies.get(enemy).unwrap().health, 1);
        let impulse = store.impulses.get(enemy).unwrap();
        assert_eq!(impulse.vy, -4.0 - ENEMY_PUSHBACK_VELOCITY);
        assert_eq!(impulse.frames, ENEMY_PUSHBACK_FRAMES);
    }

    #[test]
    fn test_lethal_hit_explodes_and_credits_the_shooter() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let enemy = add_enemy(&mut store, 1, 500);
        let player = store.create_entity();
        hit_by_laser(&mut store, enemy, player);

        EnemySystem::new().update(&mut store, &mut phases, 1);
        store.flush_removals();

        assert!(!store.enemies.contains(enemy));
        let (_, credit) = store.score_deltas.iter().next().unwrap();
        assert_eq!(credit.player, player);
        assert_eq!(credit.delta, 500);
        // Explosion entity carries a one-shot animation and a sound request.
        assert_eq!(store.view(&[ComponentKind::AnimationState]).len(), 1);
        assert_eq!(store.view(&[ComponentKind::PlaySoundEffect]).len(), 1);
    }

    #[test]
    fn test_player_contact_destroys_the_enemy_without_credit() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let enemy = add_enemy(&mut store, 3, 60);
        let player = store.create_entity();
        store.colliding_withs.insert(
            enemy,
            CollidingWith {
                contacts: vec![Contact {
                    other: player,
                    group: CollisionGroup::Player,
                    is_new: true,
                }],
            },
        );

        EnemySystem::new().update(&mut store, &mut phases, 1);
        store.flush_removals();

        assert!(!store.enemies.contains(enemy));
        assert!(store.score_deltas.iter().next().is_none());
    }

    #[test]
    fn test_enemies_below_the_playfield_are_removed() {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let enemy = add_enemy(&mut store, 1, 60);
        store.positions.get_mut(enemy).unwrap().y = PLAYFIELD_HEIGHT + 100.0;

        EnemySystem::new().update(&mut store, &mut phases, 1);
        store.flush_removals();
        assert!(!store.enemies.contains(enemy));
    }

    #[test]
    fn test_fire_cooldown_counts_down_then_spawns_a_laser()
    {
        let mut store = ComponentStore::new();
        let mut phases = PhaseControl::default();
        let enemy = add_enemy(&mut store, 1, 60);
        store.enemies.get_mut(enemy).unwrap().fire_cooldown = 1;

        let mut system = EnemySystem::new();
        system.update(&mut store, &mut phases, 1);
        assert!(store.view(&[ComponentKind::Laser]).is_empty());

        system.update(&mut store, &mut phases, 2);
        let lasers = store.view(&[ComponentKind::Laser]);
        assert_eq!(lasers.len(), 1);
        assert_eq!(store.lasers.get(lasers[0]).unwrap().source, enemy);
        assert_eq!(
            store.collision_radii.get(lasers[0]).unwrap().group,
            CollisionGroup::EnemyLaser
        );
        assert_eq!(
            store.enemies.get(enemy).unwrap().fire_cooldown,
            ENEMY_FIRE_COOLDOWN
        );
    }
}
