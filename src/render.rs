//! Draw commands and the camera transform
//!
//! The simulation never talks to a graphics device. Each tick it fills a
//! buffer of [`SpriteDraw`] commands; whatever backend the application embeds
//! (native, web, headless) drains the buffer and submits it however it likes.
//! Texture handles are opaque beyond their pixel dimensions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::collision::Rect;

/// Opaque texture reference plus the dimensions needed for sprite math
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureHandle {
    pub id: u32,
    pub width: f32,
    pub height: f32,
}

impl TextureHandle {
    pub fn new(id: u32, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// A horizontal strip of equally sized animation frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub frame_count: u32,
    pub frame_width: f32,
    pub frame_height: f32,
}

impl SpriteSheet {
    /// Slice a texture into `frame_count` side-by-side frames
    pub fn new(texture: TextureHandle, frame_count: u32) -> Self {
        debug_assert!(frame_count > 0);
        Self {
            texture,
            frame_count,
            frame_width: texture.width / frame_count as f32,
            frame_height: texture.height,
        }
    }

    /// Frame extents scaled for rendering/collision
    #[inline]
    pub fn scaled_size(&self, scale: f32) -> Vec2 {
        Vec2::new(self.frame_width * scale, self.frame_height * scale)
    }
}

/// RGBA tint applied to a draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    pub const WHITE: Tint = Tint {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

/// One textured quad to draw
///
/// A negative `source.w` flips the sprite horizontally, same convention as
/// the classic signed-source-rectangle draw call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub texture: TextureHandle,
    pub source: Rect,
    pub dest: Rect,
    pub rotation: f32,
    pub tint: Tint,
}

/// Viewport transform: the world scrolls so the focus stays centered
///
/// Recomputed every frame from the player's position; the offset applied to
/// every other entity is simply the negated focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub focus: Vec2,
}

impl Camera {
    pub fn focused_on(focus: Vec2) -> Self {
        Self { focus }
    }

    /// Offset to apply to world-space draws (the map origin on screen)
    #[inline]
    pub fn offset(&self) -> Vec2 {
        -self.focus
    }

    /// World position to screen position
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.focus
    }
}

/// How an agent's world position maps onto the screen
///
/// The player is pinned to a fixed screen point while the world scrolls
/// underneath; everything else is offset by the camera.
#[derive(Debug, Clone, Copy)]
pub enum ScreenSpace {
    Pinned(Vec2),
    Scrolling(Camera),
}

impl ScreenSpace {
    #[inline]
    pub fn project(&self, world: Vec2) -> Vec2 {
        match self {
            ScreenSpace::Pinned(pos) => *pos,
            ScreenSpace::Scrolling(camera) => camera.to_screen(world),
        }
    }
}
