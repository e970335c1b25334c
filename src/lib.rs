//! Dune Clash - a top-down arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (agents, collisions, game state)
//! - `render`: Draw-command buffer and camera transform
//! - `audio`: Event-to-cue routing over an opaque audio backend
//! - `settings`: User preferences

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Elapsed-time clamp applied by the driver before accumulating
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Window dimensions in pixels
    pub const WINDOW_WIDTH: f32 = 682.0;
    pub const WINDOW_HEIGHT: f32 = 576.0;

    /// World map scale factor (map texture pixels -> world pixels)
    pub const MAP_SCALE: f32 = 4.0;
    /// Western / northern world edges (slightly off-map so sprites can overhang)
    pub const WORLD_MIN_X: f32 = -130.0;
    pub const WORLD_MIN_Y: f32 = -100.0;
    /// Slack factor on the far world edges
    pub const BOUNDS_SLACK: f32 = 0.99;

    /// Uniform render scale for character and prop sprites
    pub const SPRITE_SCALE: f32 = 4.0;
    /// Frames per character sprite sheet
    pub const SPRITE_FRAMES: u32 = 6;
    /// Seconds per animation frame while running (12 fps)
    pub const FRAME_INTERVAL: f32 = 1.0 / 12.0;
    /// Idle animation advances this many times slower than running
    pub const IDLE_FRAME_SLOWDOWN: f32 = 3.0;

    /// Player movement step per tick (not scaled by elapsed time)
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;

    /// Weapon anchor offsets from the player's screen position
    pub const WEAPON_OFFSET_X_RIGHT: f32 = 35.0;
    pub const WEAPON_OFFSET_X_LEFT: f32 = 25.0;
    pub const WEAPON_OFFSET_Y: f32 = 55.0;
    /// Weapon swing rotation on an attack frame (degrees)
    pub const WEAPON_SWING_DEG: f32 = 35.0;

    /// Seconds between timer-driven enemy spawns
    pub const ENEMY_SPAWN_INTERVAL: f32 = 7.5;
    /// Enemies placed at startup through the same spawn operation
    pub const INITIAL_ENEMY_COUNT: u32 = 13;
    /// Per-tick movement step range for spawned enemies
    pub const ENEMY_MIN_SPEED: f32 = 1.2;
    pub const ENEMY_MAX_SPEED: f32 = 4.5;
    /// Spawn region in world space
    pub const SPAWN_MIN_X: f32 = 400.0;
    pub const SPAWN_MIN_Y: f32 = 200.0;
    pub const SPAWN_MAX_X: f32 = 4000.0;
    pub const SPAWN_MAX_Y: f32 = 3500.0;

    /// Demo autopilot swings once the target is this close (world pixels)
    pub const DEMO_ATTACK_RANGE: f32 = 140.0;
}

/// Counter-clockwise perpendicular of a vector
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}
