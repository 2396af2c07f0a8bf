//! Sprite rendering
//!
//! Draws every (Sprite, Position) pair from its sheet's frame grid,
//! centered on the position, honoring scale, rotation and the flash
//! duty cycle (10 frames on, 10 off) used for spawn invulnerability.
//! Sheet geometry is memoized from the store's `SpriteSheet` components
//! on first draw.

use crate::ecs::{
    ComponentKind, ComponentStore, PhaseControl, SheetId, SpriteSheet, System,
};
use crate::tuning::DEBUG_COLLISION_OVERLAY;
use macroquad::prelude::*;
use std::collections::HashMap;

pub struct RenderSpritesSystem {
    sheets: Option<HashMap<SheetId, SpriteSheet>>,
}

impl RenderSpritesSystem {
    pub fn new() -> Self {
        Self { sheets: None }
    }

    fn sheets<'a>(&'a mut self, store: &ComponentStore) -> &'a HashMap<SheetId, SpriteSheet> {
        self.sheets.get_or_insert_with(|| {
            store
                .sprite_sheets
                .iter()
                .map(|(_, sheet)| (sheet.id, sheet.clone()))
                .collect()
        })
    }
}

impl System for RenderSpritesSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, frame: u64) {
        let drawables = store.view(&[ComponentKind::Sprite, ComponentKind::Position]);
        let sheets = self.sheets(store);

        for entity in drawables {
            let (Some(sprite), Some(position)) =
                (store.sprites.get(entity), store.positions.get(entity))
            else {
                continue;
            };

            if sprite.flash && (frame / 10) % 2 == 0 {
                continue;
            }
            let Some(sheet) = sheets.get(&sprite.sheet) else {
                continue;
            };

            let frame_number = sprite.frame % sheet.total_frames;
            let frame_x = (frame_number % sheet.frames_x) as f32;
            let frame_y = (frame_number / sheet.frames_x) as f32;
            let width = sheet.frame_width * sprite.scale;
            let height = sheet.frame_height * sprite.scale;

            sheet.texture.set_filter(if sprite.smooth {
                FilterMode::Linear
            } else {
                FilterMode::Nearest
            });
            draw_texture_ex(
                &sheet.texture,
                position.x - width / 2.0,
                position.y - height / 2.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(width, height)),
                    source: Some(Rect::new(
                        frame_x * sheet.frame_width,
                        frame_y * sheet.frame_height,
                        sheet.frame_width,
                        sheet.frame_height,
                    )),
                    rotation: sprite.rotation,
                    ..Default::default()
                },
            );
        }
    }
}

/// Red outlines around every collision volume. Compiled in but inert
/// unless the tuning flag is flipped.
pub struct RenderCollisionDebugSystem;

impl RenderCollisionDebugSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for RenderCollisionDebugSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        if !DEBUG_COLLISION_OVERLAY {
            return;
        }
        for entity in store.view(&[ComponentKind::CollisionRadius, ComponentKind::Position]) {
            let (Some(volume), Some(position)) = (
                store.collision_radii.get(entity),
                store.positions.get(entity),
            ) else {
                continue;
            };
            draw_circle_lines(position.x, position.y, volume.radius, 2.0, RED);
        }
    }
}
