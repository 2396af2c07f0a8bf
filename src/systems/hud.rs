//! In-game HUD
//!
//! Score readouts, the extra-life glyph row per player, and the game
//! over banner with its space-to-continue handoff back to the title
//! screen. Glyphs are ordinary sprite entities; the row is torn down
//! and rebuilt whenever a player's glyph count drifts from their lives.

use crate::ecs::{
    ChangePhase, ComponentKind, ComponentStore, EntityId, ExtraLife, Phase, PhaseControl,
    Position, SheetId, Sprite, System,
};
use crate::systems::input::unhandled_key;
use crate::tuning::PLAYFIELD_HEIGHT;
use macroquad::prelude::*;
use macroquad::text::{draw_text_ex, Font, TextParams};

pub struct HudSystem {
    font: Option<Font>,
}

impl HudSystem {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }

    fn glyph_count(store: &ComponentStore, player: EntityId) -> u32 {
        store
            .extra_lives
            .iter()
            .filter(|(_, glyph)| glyph.player == player)
            .count() as u32
    }

    fn rebuild_life_glyphs(store: &mut ComponentStore, players: &[EntityId]) {
        for entity in store.view(&[ComponentKind::ExtraLife]) {
            store.remove_entity(entity);
        }

        for &player_entity in players {
            let Some(player) = store.players.get(player_entity).copied() else {
                continue;
            };
            let (start_x, direction) = if player.number == 0 {
                (40.0, 1.0)
            } else {
                (760.0, -1.0)
            };
            for i in 0..player.lives {
                let glyph = store.create_entity();
                store.extra_lives.insert(
                    glyph,
                    ExtraLife {
                        player: player_entity,
                    },
                );
                store.positions.insert(
                    glyph,
                    Position {
                        x: start_x + direction * i as f32 * 64.0,
                        y: PLAYFIELD_HEIGHT - 30.0,
                    },
                );
                store
                    .sprites
                    .insert(glyph, Sprite::new(SheetId::Player, 3.5));
            }
        }
    }

    /// Non-drawing part of the tick. Returns the scores to draw and
    /// whether every player is out of lives.
    fn run_logic(&mut self, store: &mut ComponentStore) -> (Vec<(usize, i64)>, bool) {
        let players = store.view(&[ComponentKind::Player]);

        let mut scores = Vec::new();
        let mut dead = 0;
        let mut rebuild = false;
        for &entity in &players {
            let Some(player) = store.players.get(entity).copied() else {
                continue;
            };
            scores.push((player.number, player.score));
            rebuild |= Self::glyph_count(store, entity) != player.lives;
            if player.lives == 0 {
                dead += 1;
            }
        }

        if rebuild {
            Self::rebuild_life_glyphs(store, &players);
        }

        let game_over = !players.is_empty() && dead == players.len();
        if game_over {
            if let Some(press) = unhandled_key(store, KeyCode::Space) {
                press.handled = true;
                let carrier = store.create_entity();
                store.change_phases.insert(
                    carrier,
                    ChangePhase {
                        target: Phase::Pregame,
                    },
                );
            }
        }
        (scores, game_over)
    }
}

impl System for HudSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Game)
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        let (scores, game_over) = self.run_logic(store);

        for (number, score) in scores {
            let x = if number == 0 { 10.0 } else { 520.0 };
            draw_text_ex(
                &format!("P{}: {}", number + 1, score),
                x,
                50.0,
                TextParams {
                    font: self.font.as_ref(),
                    font_size: 50,
                    color: WHITE,
                    ..Default::default()
                },
            );
        }

        if game_over {
            draw_text_ex(
                "Game Over",
                130.0,
                700.0,
                TextParams {
                    font: self.font.as_ref(),
                    font_size: 100,
                    color: WHITE,
                    ..Default::default()
                },
            );
        }
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::ExtraLife]) {
            store.remove_entity(entity);
        }
    }
}

/// Component population overlay while `Q` is held.
pub struct DebugHudSystem {
    font: Option<Font>,
}

impl DebugHudSystem {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }
}

impl System for DebugHudSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        let held = store
            .key_presses
            .iter()
            .any(|(_, press)| press.key == KeyCode::Q && !press.handled);
        if !held {
            return;
        }

        let mut y = 100.0;
        for (kind, count) in store.stats() {
            draw_text_ex(
                &format!("{:?}: {}", kind, count),
                10.0,
                y,
                TextParams {
                    font: self.font.as_ref(),
                    font_size: 40,
                    color: GRAY,
                    ..Default::default()
                },
            );
            y += 50.0;
        }
    }
}
