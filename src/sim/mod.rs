//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only
//! - Movement before collision tests before damage/removal before spawning
//! - No rendering or platform dependencies; output is a draw-command buffer
//!   and a one-shot event buffer the shell drains after each tick

pub mod agent;
pub mod collision;
pub mod enemy;
pub mod state;
pub mod tick;

pub use agent::{Agent, AnimState, Facing};
pub use collision::Rect;
pub use enemy::{Enemy, EnemyKind, KindStats, steering};
pub use state::{GameEvent, GamePhase, GameState, Player, Prop, WorldAssets, WorldBounds};
pub use tick::{TickInput, tick};
