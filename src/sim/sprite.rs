//! Sprite bounding boxes
//!
//! The simulation never touches textures; it only needs each sprite's
//! bounding box to derive a collision radius and a draw-centering offset.

use std::collections::HashMap;

use glam::Vec2;

/// Sprite keys the simulation looks up
pub mod keys {
    pub const BOMB: &str = "Bomb";
    pub const SUPER_BOMB: &str = "SuperBomb";
    pub const BULLET: &str = "Bullet";
    pub const GUN: &str = "LeftGun";
}

/// Width and height of a sprite's bounding box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSize {
    pub width: u32,
    pub height: u32,
}

impl SpriteSize {
    /// Used when a sprite is missing from the sheet
    pub const FALLBACK: Self = Self::new(32, 32);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half extent of the box, used to center the sprite on its position
    pub fn draw_offset(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// Radius of the circle through the box corners, never below 1
    pub fn collision_radius(&self) -> u32 {
        let half = self.draw_offset();
        (half.length() as u32).max(1)
    }
}

/// Bounding boxes keyed by sprite name
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sizes: HashMap<String, SpriteSize>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet with the stock gallery artwork sizes
    pub fn standard() -> Self {
        let mut sheet = Self::new();
        sheet.insert(keys::BOMB, SpriteSize::new(64, 64));
        sheet.insert(keys::SUPER_BOMB, SpriteSize::new(80, 80));
        sheet.insert(keys::BULLET, SpriteSize::new(12, 6));
        sheet.insert(keys::GUN, SpriteSize::new(128, 64));
        sheet
    }

    pub fn insert(&mut self, key: &str, size: SpriteSize) {
        self.sizes.insert(key.to_string(), size);
    }

    /// Look up a sprite, falling back to [`SpriteSize::FALLBACK`]
    pub fn size_of(&self, key: &str) -> SpriteSize {
        match self.sizes.get(key) {
            Some(size) => *size,
            None => {
                log::warn!("Sprite '{}' missing, using {:?}", key, SpriteSize::FALLBACK);
                SpriteSize::FALLBACK
            }
        }
    }
}
