//! Title screen
//!
//! Coin-op front door: key `5` inserts a credit, `1` starts a
//! one-player game for one credit, `2` a two-player game for two. The
//! credit pool entity survives phase changes so leftover credits carry
//! across games. Starting a game emits a `StartGame` request plus a
//! `ChangePhase` to hand control to the game-phase systems.

use crate::ecs::{
    AnimationState, ChangePhase, ComponentKind, ComponentStore, Credits, Phase, PhaseControl,
    Position, SheetId, Sprite, StartGame, System, TitleScreen,
};
use crate::systems::input::unhandled_key;
use crate::tuning::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use macroquad::prelude::*;
use macroquad::text::{draw_text_ex, Font, TextParams};

pub struct PregameSystem {
    font: Option<Font>,
}

impl PregameSystem {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }

    fn start_game(store: &mut ComponentStore, players: usize) {
        let request = store.create_entity();
        store.start_games.insert(request, StartGame { players });
        let carrier = store.create_entity();
        store.change_phases.insert(
            carrier,
            ChangePhase {
                target: Phase::Game,
            },
        );
    }

    /// Key handling and title-sprite swap. Returns the credit count to
    /// draw, if any.
    fn run_logic(&mut self, store: &mut ComponentStore) -> Option<u32> {
        let pool = store.view(&[ComponentKind::Credits]).into_iter().next()?;

        if let Some(press) = unhandled_key(store, KeyCode::Key1) {
            press.handled = true;
            let affordable = store
                .credits
                .get(pool)
                .map(|c| c.credits >= 1)
                .unwrap_or(false);
            if affordable {
                store.credits.get_mut(pool).unwrap().credits -= 1;
                Self::start_game(store, 1);
            }
        }
        if let Some(press) = unhandled_key(store, KeyCode::Key2) {
            press.handled = true;
            let affordable = store
                .credits
                .get(pool)
                .map(|c| c.credits >= 2)
                .unwrap_or(false);
            if affordable {
                store.credits.get_mut(pool).unwrap().credits -= 2;
                Self::start_game(store, 2);
            }
        }
        if let Some(press) = unhandled_key(store, KeyCode::Key5) {
            press.handled = true;
            if let Some(credits) = store.credits.get_mut(pool) {
                credits.credits += 1;
            }
        }

        let credits = store.credits.get(pool).map(|c| c.credits).unwrap_or(0);
        if credits == 0 {
            return None;
        }

        // The title art advertises how many can join.
        if let Some(title) = store
            .view(&[ComponentKind::TitleScreen, ComponentKind::Sprite])
            .into_iter()
            .next()
        {
            if let Some(sprite) = store.sprites.get_mut(title) {
                sprite.sheet = if credits == 1 {
                    SheetId::StartScreen1p
                } else {
                    SheetId::StartScreen2p
                };
            }
        }
        Some(credits)
    }
}

impl System for PregameSystem {
    fn phase(&self) -> Option<Phase> {
        Some(Phase::Pregame)
    }

    fn startup(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl) {
        let title = store.create_entity();
        store.title_screens.insert(title, TitleScreen);
        store.positions.insert(
            title,
            Position {
                x: PLAYFIELD_WIDTH / 2.0,
                y: PLAYFIELD_HEIGHT / 2.0,
            },
        );
        store.sprites.insert(
            title,
            Sprite::new(SheetId::StartScreen, PLAYFIELD_WIDTH / 256.0),
        );
        store
            .animation_states
            .insert(title, AnimationState::looping(10));

        // The credit pool persists across games; only seed it once.
        if store.view(&[ComponentKind::Credits]).is_empty() {
            let pool = store.create_entity();
            store.credits.insert(pool, Credits::default());
        }
    }

    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        if let Some(credits) = self.run_logic(store) {
            draw_text_ex(
                &format!("CREDITS: {}", credits),
                240.0,
                1500.0,
                TextParams {
                    font: self.font.as_ref(),
                    font_size: 50,
                    color: WHITE,
                    ..Default::default()
                },
            );
        }
    }

    fn teardown(&mut self, store: &mut ComponentStore) {
        for entity in store.view(&[ComponentKind::TitleScreen]) {
            store.remove_entity(entity);
        }
    }
}
