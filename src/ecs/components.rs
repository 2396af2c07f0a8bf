//! Game Components
//!
//! All the component kinds used by the shooter. Components are plain
//! data structs - behavior lives in systems. Each kind gets exactly one
//! typed column in the [`ComponentStore`](super::store::ComponentStore).

use super::entity::EntityId;
use super::schedule::Phase;
use macroquad::audio::Sound;
use macroquad::prelude::{KeyCode, Texture2D};
use serde::{Deserialize, Serialize};

// =============================================================================
// Identity enums (closed sets - no string-keyed lookups)
// =============================================================================

/// Which sprite sheet a sprite draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetId {
    Player,
    Background,
    Laser,
    Enemy1,
    Enemy2,
    Enemy3,
    Explosion,
    StartScreen,
    StartScreen1p,
    StartScreen2p,
}

/// Which sound clip to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    Laser,
    Explosion,
}

/// Which collision family a volume belongs to. Systems filter contacts
/// by group rather than by concrete entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionGroup {
    Player,
    PlayerLaser,
    Enemy,
    EnemyLaser,
}

/// Logical gamepad buttons the game cares about. Stick deflection past
/// the threshold is reported as the matching direction button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadButton {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

// =============================================================================
// Physics / movement
// =============================================================================

/// World position, center of the entity's sprite. Playfield coordinates
/// (800x1600, y down).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Per-frame velocity in playfield pixels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

/// A finite-duration kick layered on top of normal velocity (enemy
/// pushback when a laser connects). Removes itself when `frames` runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Impulse {
    pub vx: f32,
    pub vy: f32,
    pub frames: i32,
}

// =============================================================================
// Collision
// =============================================================================

/// Circular collision volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionRadius {
    pub radius: f32,
    pub group: CollisionGroup,
}

/// One overlap recorded by collision detection. `is_new` is true only
/// on the first consecutive tick the pair overlaps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Contact {
    pub other: EntityId,
    pub group: CollisionGroup,
    pub is_new: bool,
}

/// Every overlap involving this entity, rebuilt from scratch each tick
/// by collision detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollidingWith {
    pub contacts: Vec<Contact>,
}

// =============================================================================
// Gameplay
// =============================================================================

/// A player ship. Score and lives live here; the HUD only reads them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// 0 = keyboard + pad 0, 1 = pad 1
    pub number: usize,
    pub score: i64,
    pub lives: u32,
    pub fire_cooldown: u32,
    pub respawn_timer: u32,
    pub invulnerable_timer: u32,
}

/// An enemy ship. Points are credited to whoever lands the killing shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub health: i32,
    pub points: i64,
    pub fire_cooldown: u32,
}

/// A laser bolt, traceable back to the entity that fired it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Laser {
    pub source: EntityId,
}

/// Request to adjust a player's score. Applied and cleared by the
/// player system at the end of its update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModifyScore {
    pub player: EntityId,
    pub delta: i64,
}

/// Marks the scrolling star-field entities.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Background;

/// Marks the title-screen entity owned by the pregame system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TitleScreen;

/// Coin-op credit pool, singleton across phase transitions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Credits {
    pub credits: u32,
}

/// One HUD life glyph, owned by a player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtraLife {
    pub player: EntityId,
}

/// Request to start a game with this many players. Consumed by the
/// player system's startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartGame {
    pub players: usize,
}

/// Request to switch the scheduler to another phase at the next tick
/// boundary. Consumed by the phase-controller system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangePhase {
    pub target: Phase,
}

// =============================================================================
// Input
// =============================================================================

/// One held keyboard key. Exists while the key is down; `handled` lets
/// a system consume a press so it does not retrigger every frame.
#[derive(Debug, Clone, Copy)]
pub struct KeyPress {
    pub key: KeyCode,
    pub handled: bool,
}

/// One held gamepad button (or deflected stick direction).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GamepadButtonPress {
    pub pad: usize,
    pub button: PadButton,
    pub handled: bool,
}

// =============================================================================
// Presentation
// =============================================================================

/// A drawable sprite referencing a sheet by id.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub sheet: SheetId,
    pub frame: u32,
    pub scale: f32,
    pub smooth: bool,
    /// Blink with a 10-frame duty cycle (spawn invulnerability).
    pub flash: bool,
    /// Radians, clockwise, about the sprite center.
    pub rotation: f32,
}

impl Sprite {
    pub fn new(sheet: SheetId, scale: f32) -> Self {
        Self {
            sheet,
            frame: 0,
            scale,
            smooth: false,
            flash: false,
            rotation: 0.0,
        }
    }
}

/// Drives a sprite's frame counter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnimationState {
    pub animate: bool,
    /// Advance one frame every this many ticks.
    pub frame_delay: u64,
    /// Stop once the sprite reaches this frame.
    pub pause_after_frame: Option<u32>,
    /// Remove the whole entity once the animation completes (explosions).
    pub delete_after_complete: bool,
    pub complete: bool,
}

impl AnimationState {
    pub fn looping(frame_delay: u64) -> Self {
        Self {
            animate: true,
            frame_delay,
            pause_after_frame: None,
            delete_after_complete: false,
            complete: false,
        }
    }

    pub fn one_shot(frame_delay: u64, pause_after_frame: u32) -> Self {
        Self {
            animate: true,
            frame_delay,
            pause_after_frame: Some(pause_after_frame),
            delete_after_complete: true,
            complete: false,
        }
    }
}

/// A loaded sprite sheet: texture plus frame grid geometry. Lives in
/// the store like any other component so systems can look sheets up
/// without a side channel.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub id: SheetId,
    pub texture: Texture2D,
    pub frames_x: u32,
    pub frames_y: u32,
    pub total_frames: u32,
    pub frame_width: f32,
    pub frame_height: f32,
}

/// A loaded sound clip.
#[derive(Debug, Clone)]
pub struct SoundEffect {
    pub id: SoundId,
    pub sound: Sound,
}

/// Fire-and-forget request to play a clip, drained by the audio system
/// every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlaySoundEffect {
    pub sound: SoundId,
}
