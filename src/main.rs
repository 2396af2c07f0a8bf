//! STARBLITZ: a vertical-scrolling arcade shooter
//!
//! One- or two-player coin-op style shooter built on a minimal ECS:
//! - Typed component columns with insertion-ordered views
//! - Deferred deletion applied once per tick
//! - Phased scheduler (title screen / game) with strict
//!   teardown-before-startup transitions
//!
//! The playfield is a fixed 800x1600 world rendered through a camera,
//! so the window can be any size.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod ecs;
mod systems;
mod tuning;

use ecs::{ComponentStore, Scheduler};
use macroquad::prelude::*;
use systems::*;
use tuning::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("STARBLITZ v{}", VERSION),
        window_width: 600,
        window_height: 1200,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let mut store = ComponentStore::new();
    assets::load_into(&mut store).await;
    let hud_font = assets::load_font().await;
    let pregame_font = hud_font.clone();
    let debug_font = hud_font.clone();

    let mut scheduler = Scheduler::new();
    scheduler.register(KeyboardInputSystem::new());
    #[cfg(not(target_arch = "wasm32"))]
    scheduler.register(GamepadInputSystem::new());
    scheduler.register(GamePhaseSystem::new());
    scheduler.register(BackgroundSystem::new());
    scheduler.register(PlayerSystem::new());
    scheduler.register(MovementSystem::new());
    scheduler.register(CollisionDetectionSystem::new());
    scheduler.register(LaserSystem::new());
    scheduler.register(EnemySystem::new());
    scheduler.register(SpriteAnimateSystem::new());
    scheduler.register(AudioSystem::new());
    scheduler.register(RenderSpritesSystem::new());
    scheduler.register(RenderCollisionDebugSystem::new());
    scheduler.register(HudSystem::new(hud_font));
    scheduler.register(DebugHudSystem::new(debug_font));
    scheduler.register(PregameSystem::new(pregame_font));

    scheduler.startup(&mut store);

    // Negative height flips the y axis so the playfield reads top-down
    // like screen coordinates.
    let camera = Camera2D::from_display_rect(Rect::new(
        0.0,
        PLAYFIELD_HEIGHT,
        PLAYFIELD_WIDTH,
        -PLAYFIELD_HEIGHT,
    ));

    let mut frame: u64 = 0;
    loop {
        clear_background(BLACK);
        set_camera(&camera);

        scheduler.update(&mut store, frame);

        set_default_camera();
        frame += 1;
        next_frame().await;
    }
}
