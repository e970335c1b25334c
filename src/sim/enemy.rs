//! Enemy kinds and pursuit behavior
//!
//! Enemies are a closed set of kinds sharing one `Agent`; the differences
//! between kinds are parameter deltas (health, contact damage, engagement
//! radius) and a small steering adjustment applied to the raw pursuit
//! vector, not separate types.

use glam::Vec2;

use crate::perpendicular;
use crate::render::{Camera, ScreenSpace, SpriteDraw, SpriteSheet};
use crate::sim::agent::Agent;
use crate::sim::collision::Rect;
use crate::sim::state::{GameEvent, Player};

/// The closed set of enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Goblin,
    Slime,
    IntellectDevourer,
    EliteGoblin,
    SlimeKing,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Goblin,
        EnemyKind::Slime,
        EnemyKind::IntellectDevourer,
        EnemyKind::EliteGoblin,
        EnemyKind::SlimeKing,
    ];

    /// Fixed per-kind tuning, resolved once at construction
    pub fn stats(&self) -> KindStats {
        match self {
            EnemyKind::Goblin => KindStats {
                max_health: 100.0,
                damage_per_sec: 12.0,
                engagement_radius: 25.0,
            },
            EnemyKind::Slime => KindStats {
                max_health: 60.0,
                damage_per_sec: 8.0,
                engagement_radius: 20.0,
            },
            EnemyKind::IntellectDevourer => KindStats {
                max_health: 180.0,
                damage_per_sec: 20.0,
                engagement_radius: 35.0,
            },
            EnemyKind::EliteGoblin => KindStats {
                max_health: 150.0,
                damage_per_sec: 18.0,
                engagement_radius: 30.0,
            },
            EnemyKind::SlimeKing => KindStats {
                max_health: 120.0,
                damage_per_sec: 15.0,
                engagement_radius: 28.0,
            },
        }
    }
}

/// Per-kind constants derived from [`EnemyKind::stats`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindStats {
    pub max_health: f32,
    pub damage_per_sec: f32,
    pub engagement_radius: f32,
}

/// Per-kind adjustment of the raw pursuit vector
///
/// `raw` points from the enemy to its target, `distance` is its length and
/// `radius` the kind's engagement radius. Returns the movement intent to
/// hand to the agent; zero means stand ground this tick.
pub fn steering(kind: EnemyKind, raw: Vec2, distance: f32, radius: f32) -> Vec2 {
    match kind {
        // Slimes keep their distance and stop well short of contact
        EnemyKind::Slime | EnemyKind::SlimeKing => {
            if distance < radius * 1.2 {
                Vec2::ZERO
            } else {
                raw
            }
        }
        // Devourers press in much closer before disengaging
        EnemyKind::IntellectDevourer => {
            if distance < radius * 0.8 {
                Vec2::ZERO
            } else {
                raw
            }
        }
        // Elite goblins circle while closing the last stretch
        EnemyKind::EliteGoblin => {
            if distance < radius {
                Vec2::ZERO
            } else if distance < radius * 1.5 {
                raw + perpendicular(raw) * 0.3
            } else {
                raw
            }
        }
        EnemyKind::Goblin => {
            if distance < radius {
                Vec2::ZERO
            } else {
                raw
            }
        }
    }
}

/// An autonomous pursuer
#[derive(Debug, Clone)]
pub struct Enemy {
    pub agent: Agent,
    pub kind: EnemyKind,
    pub damage_per_sec: f32,
    pub engagement_radius: f32,
    /// One-shot gate for the death cue
    felled: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, world_pos: Vec2, idle: SpriteSheet, run: SpriteSheet, speed: f32) -> Self {
        let stats = kind.stats();
        Self {
            agent: Agent::new(idle, run, world_pos, speed, stats.max_health),
            kind,
            damage_per_sec: stats.damage_per_sec,
            engagement_radius: stats.engagement_radius,
            felled: false,
        }
    }

    pub fn collision_rect(&self, camera: Camera) -> Rect {
        self.agent.collision_rect(ScreenSpace::Scrolling(camera))
    }

    /// Pursue the target for one tick, then apply contact damage
    ///
    /// A dead enemy stays in the population until the next attack pass
    /// removes it; here it only fires its death cue once and is otherwise
    /// inert.
    pub fn tick(
        &mut self,
        target: &mut Player,
        camera: Camera,
        dt: f32,
        draws: &mut Vec<SpriteDraw>,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.agent.alive {
            if !self.felled {
                self.felled = true;
                events.push(GameEvent::EnemyFelled(self.kind));
            }
            return;
        }

        let view = ScreenSpace::Scrolling(camera);
        let raw = target.screen_pos() - self.agent.screen_pos(view);
        let distance = raw.length();
        self.agent.intent = steering(self.kind, raw, distance, self.engagement_radius);
        self.agent.tick(dt, view, draws);

        // Continuous contact damage: scales with how long the overlap lasts
        if self.agent.collision_rect(view).overlaps(&target.collision_rect()) {
            target.agent.take_damage(self.damage_per_sec * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextureHandle;

    fn sheet(id: u32) -> SpriteSheet {
        SpriteSheet::new(TextureHandle::new(id, 192.0, 32.0), 6)
    }

    fn player() -> Player {
        Player::new(
            Vec2::new(1000.0, 1000.0),
            sheet(10),
            sheet(11),
            SpriteSheet::new(TextureHandle::new(12, 32.0, 32.0), 1),
        )
    }

    #[test]
    fn test_stat_table() {
        let g = EnemyKind::Goblin.stats();
        assert_eq!((g.max_health, g.damage_per_sec, g.engagement_radius), (100.0, 12.0, 25.0));
        let s = EnemyKind::Slime.stats();
        assert_eq!((s.max_health, s.damage_per_sec, s.engagement_radius), (60.0, 8.0, 20.0));
        let d = EnemyKind::IntellectDevourer.stats();
        assert_eq!((d.max_health, d.damage_per_sec, d.engagement_radius), (180.0, 20.0, 35.0));
        let e = EnemyKind::EliteGoblin.stats();
        assert_eq!((e.max_health, e.damage_per_sec, e.engagement_radius), (150.0, 18.0, 30.0));
        let k = EnemyKind::SlimeKing.stats();
        assert_eq!((k.max_health, k.damage_per_sec, k.engagement_radius), (120.0, 15.0, 28.0));
    }

    #[test]
    fn test_goblin_halts_inside_engagement_radius() {
        let raw = Vec2::new(24.0, 0.0);
        assert_eq!(steering(EnemyKind::Goblin, raw, 24.0, 25.0), Vec2::ZERO);

        let raw = Vec2::new(26.0, 0.0);
        let out = steering(EnemyKind::Goblin, raw, 26.0, 25.0);
        assert_eq!(out, raw);
        assert!(out.x > 0.0);
    }

    #[test]
    fn test_slimes_stop_further_out() {
        // radius 20, cautious threshold 24
        let raw = Vec2::new(0.0, 23.0);
        assert_eq!(steering(EnemyKind::Slime, raw, 23.0, 20.0), Vec2::ZERO);
        assert_eq!(steering(EnemyKind::Slime, raw, 25.0, 20.0), raw);

        // slime king shares the multiplier at its own radius
        assert_eq!(steering(EnemyKind::SlimeKing, raw, 33.0, 28.0), Vec2::ZERO);
        assert_eq!(steering(EnemyKind::SlimeKing, raw, 34.0, 28.0), raw);
    }

    #[test]
    fn test_devourer_presses_past_its_radius() {
        // radius 35, disengages only inside 28
        let raw = Vec2::new(30.0, 0.0);
        assert_eq!(steering(EnemyKind::IntellectDevourer, raw, 30.0, 35.0), raw);
        assert_eq!(
            steering(EnemyKind::IntellectDevourer, raw, 27.0, 35.0),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_elite_goblin_strafes_while_closing() {
        let raw = Vec2::new(35.0, 0.0);

        // Inside the strafe band a perpendicular component is mixed in
        let out = steering(EnemyKind::EliteGoblin, raw, 35.0, 30.0);
        assert_eq!(out, raw + Vec2::new(0.0, 35.0 * 0.3));

        // Inside the radius it halts, outside the band it pursues straight
        assert_eq!(steering(EnemyKind::EliteGoblin, raw, 29.0, 30.0), Vec2::ZERO);
        assert_eq!(steering(EnemyKind::EliteGoblin, raw, 50.0, 30.0), raw);
    }

    #[test]
    fn test_contact_damage_applied_on_overlap() {
        let mut target = player();
        // Place the enemy so its screen rect coincides with the player's
        let world = target.agent.world_pos + target.screen_pos();
        let camera = Camera::focused_on(target.agent.world_pos);
        let mut enemy = Enemy::new(EnemyKind::Goblin, world, sheet(1), sheet(2), 3.0);

        let mut draws = Vec::new();
        let mut events = Vec::new();
        enemy.tick(&mut target, camera, 0.5, &mut draws, &mut events);

        // 12 dps for half a second
        assert!((target.agent.health - 94.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_damage_without_overlap() {
        let mut target = player();
        let camera = Camera::focused_on(target.agent.world_pos);
        let far = target.agent.world_pos + Vec2::new(2000.0, 0.0);
        let mut enemy = Enemy::new(EnemyKind::Goblin, far, sheet(1), sheet(2), 3.0);

        let mut draws = Vec::new();
        let mut events = Vec::new();
        enemy.tick(&mut target, camera, 0.5, &mut draws, &mut events);
        assert_eq!(target.agent.health, 100.0);
    }

    #[test]
    fn test_felled_cue_fires_once() {
        let mut target = player();
        let camera = Camera::focused_on(target.agent.world_pos);
        let mut enemy = Enemy::new(
            EnemyKind::Slime,
            Vec2::new(0.0, 0.0),
            sheet(1),
            sheet(2),
            3.0,
        );
        enemy.agent.kill();

        let mut draws = Vec::new();
        let mut events = Vec::new();
        let pos = enemy.agent.world_pos;
        enemy.tick(&mut target, camera, 0.1, &mut draws, &mut events);
        enemy.tick(&mut target, camera, 0.1, &mut draws, &mut events);

        assert_eq!(events, vec![GameEvent::EnemyFelled(EnemyKind::Slime)]);
        // A dead enemy neither moves nor draws
        assert_eq!(enemy.agent.world_pos, pos);
        assert!(draws.is_empty());
    }
}
