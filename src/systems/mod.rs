//! Gameplay Systems
//!
//! Every system is a pure consumer of the ECS core: compute a view,
//! read/mutate components in place, create entities, enqueue deferred
//! removals. None of them add core mechanism; they differ only in
//! numeric policy (speeds, cooldowns, damage, spawn cadence).
//!
//! Registration order (see `main`) is the arcade loop order: input
//! first, then phase control, simulation, collision, animation, and
//! finally rendering and HUD.

pub mod animation;
pub mod audio;
pub mod background;
pub mod collision;
pub mod enemy;
pub mod hud;
pub mod input;
pub mod laser;
pub mod movement;
pub mod phase;
pub mod player;
pub mod pregame;
pub mod render;

pub use animation::SpriteAnimateSystem;
pub use audio::AudioSystem;
pub use background::BackgroundSystem;
pub use collision::CollisionDetectionSystem;
pub use enemy::EnemySystem;
pub use hud::{DebugHudSystem, HudSystem};
pub use input::KeyboardInputSystem;
#[cfg(not(target_arch = "wasm32"))]
pub use input::GamepadInputSystem;
pub use laser::LaserSystem;
pub use movement::MovementSystem;
pub use phase::GamePhaseSystem;
pub use player::PlayerSystem;
pub use pregame::PregameSystem;
pub use render::{RenderCollisionDebugSystem, RenderSpritesSystem};
