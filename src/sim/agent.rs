//! Agents: shared state and behavior for the knight and every enemy
//!
//! An agent owns its world position, per-frame movement intent, health, and
//! sprite animation. Movement is speculative: `tick` applies the intent
//! immediately and the orchestrator calls [`Agent::undo_movement`] afterwards
//! if the new position turns out to be illegal.

use glam::Vec2;

use crate::consts::{FRAME_INTERVAL, IDLE_FRAME_SLOWDOWN, SPRITE_SCALE};
use crate::render::{ScreenSpace, SpriteDraw, SpriteSheet, Tint};
use crate::sim::collision::Rect;

/// Horizontal facing, decided by the sign of the movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Sign applied to the sprite source width (negative flips)
    #[inline]
    pub fn flip_sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Animation state, one sprite sheet per state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Running,
}

/// A positioned, animated, damageable entity
#[derive(Debug, Clone)]
pub struct Agent {
    pub idle: SpriteSheet,
    pub run: SpriteSheet,
    /// Authoritative position in world space
    pub world_pos: Vec2,
    /// Position at the start of the current tick, kept for undo
    pub world_pos_prev: Vec2,
    /// Desired displacement direction for this tick; consumed and cleared
    pub intent: Vec2,
    pub facing: Facing,
    pub anim: AnimState,
    pub frame: u32,
    pub frame_timer: f32,
    /// Displacement magnitude per moving tick (not scaled by elapsed time)
    pub speed: f32,
    pub scale: f32,
    pub health: f32,
    pub alive: bool,
    was_moving: bool,
}

impl Agent {
    pub fn new(idle: SpriteSheet, run: SpriteSheet, world_pos: Vec2, speed: f32, health: f32) -> Self {
        Self {
            idle,
            run,
            world_pos,
            world_pos_prev: world_pos,
            intent: Vec2::ZERO,
            facing: Facing::Right,
            anim: AnimState::Idle,
            frame: 0,
            frame_timer: 0.0,
            speed,
            scale: SPRITE_SCALE,
            health,
            alive: true,
            was_moving: false,
        }
    }

    /// Sprite sheet for the current animation state
    #[inline]
    pub fn sheet(&self) -> SpriteSheet {
        match self.anim {
            AnimState::Idle => self.idle,
            AnimState::Running => self.run,
        }
    }

    /// Advance movement and animation by one tick, then emit the draw
    ///
    /// The displacement magnitude is the fixed per-agent `speed`, not scaled
    /// by `dt`; callers keep pacing stable by clamping elapsed time and
    /// stepping at a fixed rate. Switching between idle and running restarts
    /// the cycle at frame 0 so there is never a blended transition frame.
    pub fn tick(&mut self, dt: f32, view: ScreenSpace, draws: &mut Vec<SpriteDraw>) {
        self.world_pos_prev = self.world_pos;

        let moving = self.intent != Vec2::ZERO;
        self.frame_timer += dt;

        if moving {
            self.world_pos += self.intent.normalize_or_zero() * self.speed;
            self.facing = if self.intent.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };

            if !self.was_moving {
                self.anim = AnimState::Running;
                self.frame = 0;
                self.frame_timer = 0.0;
            }

            if self.frame_timer >= FRAME_INTERVAL {
                self.frame += 1;
                self.frame_timer = 0.0;
            }
        } else {
            if self.was_moving {
                self.anim = AnimState::Idle;
                self.frame = 0;
                self.frame_timer = 0.0;
            }

            // Idle cycle runs three times slower than the run cycle
            if self.frame_timer >= FRAME_INTERVAL * IDLE_FRAME_SLOWDOWN {
                self.frame += 1;
                self.frame_timer = 0.0;
            }
        }

        self.was_moving = moving;
        self.intent = Vec2::ZERO;

        let sheet = self.sheet();
        if self.frame >= sheet.frame_count {
            self.frame = 0;
        }

        let screen = view.project(self.world_pos);
        draws.push(SpriteDraw {
            texture: sheet.texture,
            source: Rect::new(
                self.frame as f32 * sheet.frame_width,
                0.0,
                self.facing.flip_sign() * sheet.frame_width,
                sheet.frame_height,
            ),
            dest: Rect::at(screen, sheet.scaled_size(self.scale)),
            rotation: 0.0,
            tint: Tint::WHITE,
        });
    }

    /// Revert the position to its pre-tick value
    ///
    /// The sole collision-resolution primitive. Touches nothing but the
    /// position, and is idempotent until the next tick takes a new snapshot.
    pub fn undo_movement(&mut self) {
        self.world_pos = self.world_pos_prev;
    }

    /// Apply damage, clamping health at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        if self.health == 0.0 {
            self.alive = false;
        }
    }

    /// Lethal damage regardless of remaining health
    pub fn kill(&mut self) {
        self.health = 0.0;
        self.alive = false;
    }

    #[inline]
    pub fn screen_pos(&self, view: ScreenSpace) -> Vec2 {
        view.project(self.world_pos)
    }

    /// Screen-space collision rectangle, recomputed on demand
    pub fn collision_rect(&self, view: ScreenSpace) -> Rect {
        let sheet = self.sheet();
        Rect::at(self.screen_pos(view), sheet.scaled_size(self.scale))
    }
}
