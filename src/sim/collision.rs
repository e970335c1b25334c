//! Axis-aligned rectangle overlap tests
//!
//! Every collision in the game reduces to one primitive: do two screen-space
//! rectangles overlap? Movement is speculative - agents move first, overlap
//! is tested second, and an illegal move is undone by the orchestrator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
///
/// Width and height may be negative when the rectangle describes a
/// horizontally flipped sprite source; collision queries normalize first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at `pos` with the given extents
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Top-left anchor
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Equivalent rectangle with non-negative extents
    pub fn normalized(&self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self::new(x, y, w, h)
    }

    /// Strict overlap test: rectangles that merely touch along an edge do
    /// not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
    }
}
