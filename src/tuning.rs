//! Gameplay tuning constants.
//!
//! Numeric policy lives here so designers (read: us, at 2am) can tweak
//! feel without hunting through systems.

/// Logical playfield size. Rendering maps this onto the window through
/// a 2D camera, so gameplay math never sees the real resolution.
pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 1600.0;

// Player
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_FIRE_COOLDOWN: u32 = 35;
pub const PLAYER_RESPAWN_TIME: u32 = 100;
pub const PLAYER_SPAWN_INVULNERABILITY: u32 = 200;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_COLLISION_RADIUS: f32 = 50.0;
pub const PLAYER_LASER_SPEED: f32 = -20.0;

// Enemies
pub const ENEMY_SPAWN_INTERVAL: u64 = 80;
pub const ENEMY_FIRE_COOLDOWN: u32 = 200;
pub const ENEMY_LASER_SPEED: f32 = 15.0;
pub const ENEMY_PUSHBACK_VELOCITY: f32 = 10.0;
pub const ENEMY_PUSHBACK_FRAMES: i32 = 20;

// Lasers
pub const LASER_COLLISION_RADIUS: f32 = 20.0;

// Debug overlays
pub const DEBUG_COLLISION_OVERLAY: bool = false;
