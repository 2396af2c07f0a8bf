//! Asset loading
//!
//! Loads the sprite-sheet and sound manifest into the store as
//! `SpriteSheet` / `SoundEffect` components, one entity each, so
//! systems can look them up without a side channel. A failed load is
//! logged and skipped; the game runs with whatever made it in.

use crate::ecs::{ComponentStore, SheetId, SoundEffect, SoundId, SpriteSheet};
use macroquad::audio::load_sound;
use macroquad::prelude::*;

struct SheetSpec {
    id: SheetId,
    path: &'static str,
    frames_x: u32,
    frames_y: u32,
    total_frames: u32,
    frame_width: f32,
    frame_height: f32,
}

const SHEETS: [SheetSpec; 10] = [
    SheetSpec { id: SheetId::Player, path: "assets/player.png", frames_x: 4, frames_y: 4, total_frames: 13, frame_width: 16.0, frame_height: 16.0 },
    SheetSpec { id: SheetId::Background, path: "assets/stars.png", frames_x: 3, frames_y: 2, total_frames: 5, frame_width: 256.0, frame_height: 512.0 },
    SheetSpec { id: SheetId::Laser, path: "assets/laser.png", frames_x: 1, frames_y: 1, total_frames: 1, frame_width: 32.0, frame_height: 32.0 },
    SheetSpec { id: SheetId::Enemy1, path: "assets/enemy1.png", frames_x: 2, frames_y: 2, total_frames: 4, frame_width: 32.0, frame_height: 32.0 },
    SheetSpec { id: SheetId::Enemy2, path: "assets/enemy2.png", frames_x: 3, frames_y: 4, total_frames: 12, frame_width: 32.0, frame_height: 32.0 },
    SheetSpec { id: SheetId::Enemy3, path: "assets/enemy3.png", frames_x: 2, frames_y: 3, total_frames: 6, frame_width: 32.0, frame_height: 32.0 },
    SheetSpec { id: SheetId::Explosion, path: "assets/boom.png", frames_x: 3, frames_y: 3, total_frames: 7, frame_width: 32.0, frame_height: 32.0 },
    SheetSpec { id: SheetId::StartScreen, path: "assets/startscreen.png", frames_x: 2, frames_y: 2, total_frames: 3, frame_width: 256.0, frame_height: 512.0 },
    SheetSpec { id: SheetId::StartScreen1p, path: "assets/startscreen1p.png", frames_x: 2, frames_y: 2, total_frames: 3, frame_width: 256.0, frame_height: 512.0 },
    SheetSpec { id: SheetId::StartScreen2p, path: "assets/startscreen2p.png", frames_x: 2, frames_y: 2, total_frames: 3, frame_width: 256.0, frame_height: 512.0 },
];

const SOUNDS: [(SoundId, &str); 2] = [
    (SoundId::Laser, "assets/laser.wav"),
    (SoundId::Explosion, "assets/explosion.wav"),
];

/// Error type for asset loading.
#[derive(Debug)]
pub enum AssetError {
    Load(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Load(msg) => write!(f, "Load error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<macroquad::Error> for AssetError {
    fn from(e: macroquad::Error) -> Self {
        AssetError::Load(e.to_string())
    }
}

async fn load_sheet(spec: &SheetSpec) -> Result<SpriteSheet, AssetError> {
    let texture = load_texture(spec.path).await?;
    texture.set_filter(FilterMode::Nearest);
    Ok(SpriteSheet {
        id: spec.id,
        texture,
        frames_x: spec.frames_x,
        frames_y: spec.frames_y,
        total_frames: spec.total_frames,
        frame_width: spec.frame_width,
        frame_height: spec.frame_height,
    })
}

/// Load the whole manifest into the store.
pub async fn load_into(store: &mut ComponentStore) {
    for spec in &SHEETS {
        match load_sheet(spec).await {
            Ok(sheet) => {
                let entity = store.create_entity();
                store.sprite_sheets.insert(entity, sheet);
            }
            Err(e) => println!("Failed to load {}: {}", spec.path, e),
        }
    }

    for (id, path) in SOUNDS {
        match load_sound(path).await {
            Ok(sound) => {
                let entity = store.create_entity();
                store.sound_effects.insert(entity, SoundEffect { id, sound });
            }
            Err(e) => println!("Failed to load {}: {}", path, e),
        }
    }
}

/// The HUD font. Text falls back to the built-in font when missing.
pub async fn load_font() -> Option<Font> {
    match load_ttf_font("assets/pixeloid.ttf").await {
        Ok(font) => Some(font),
        Err(e) => {
            println!("Failed to load HUD font: {}", e);
            None
        }
    }
}
