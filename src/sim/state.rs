//! Game state and core simulation types
//!
//! Everything the orchestrator owns lives here: the player, the enemy
//! population, the static props, and the per-frame draw/event buffers the
//! application shell drains after each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::render::{Camera, ScreenSpace, SpriteDraw, SpriteSheet, TextureHandle, Tint};
use crate::sim::agent::{Agent, Facing};
use crate::sim::collision::Rect;
use crate::sim::enemy::{Enemy, EnemyKind};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Splash screen, waiting for start input
    Title,
    /// Active gameplay
    Playing,
    /// Player health reached zero; simulation frozen, shell keeps rendering
    Defeat,
    /// Population cleared; same freeze semantics as defeat
    Victory,
}

impl GamePhase {
    /// Terminal phases stop all agent ticks until an out-of-scope restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Defeat | GamePhase::Victory)
    }
}

/// One-shot notifications drained by the shell each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Left the title screen
    Started,
    /// The player swung the weapon (hit or not)
    AttackSwung,
    EnemySpawned(EnemyKind),
    EnemyFelled(EnemyKind),
    PlayerDefeated,
    Won,
}

/// Every sprite sheet and texture the world is built from
///
/// Handles are opaque; the shell loads the actual pixels and only the
/// dimensions matter here. Elite goblins share the goblin sheets and the
/// slime king the slime sheets; devourers use one sheet for both states.
#[derive(Debug, Clone, Copy)]
pub struct WorldAssets {
    pub map: TextureHandle,
    pub knight_idle: SpriteSheet,
    pub knight_run: SpriteSheet,
    pub weapon: SpriteSheet,
    pub goblin_idle: SpriteSheet,
    pub goblin_run: SpriteSheet,
    pub slime_idle: SpriteSheet,
    pub slime_run: SpriteSheet,
    pub devourer_idle: SpriteSheet,
    pub rock: TextureHandle,
    pub sign: TextureHandle,
    pub log: TextureHandle,
}

impl WorldAssets {
    /// Idle/run sheet pair for an enemy kind
    pub fn enemy_sheets(&self, kind: EnemyKind) -> (SpriteSheet, SpriteSheet) {
        match kind {
            EnemyKind::Goblin | EnemyKind::EliteGoblin => (self.goblin_idle, self.goblin_run),
            EnemyKind::Slime | EnemyKind::SlimeKing => (self.slime_idle, self.slime_run),
            EnemyKind::IntellectDevourer => (self.devourer_idle, self.devourer_idle),
        }
    }
}

/// The player-controlled knight
///
/// Pinned to a fixed screen position; the world scrolls underneath. Owns
/// the weapon sprite whose rectangle the attack pass tests against.
#[derive(Debug, Clone)]
pub struct Player {
    pub agent: Agent,
    screen_pos: Vec2,
    pub weapon: SpriteSheet,
}

impl Player {
    pub fn new(world_pos: Vec2, idle: SpriteSheet, run: SpriteSheet, weapon: SpriteSheet) -> Self {
        // Centered in the window, anchored at the sprite's top-left
        let screen_pos = Vec2::new(
            WINDOW_WIDTH / 2.0 - SPRITE_SCALE * 0.5 * idle.frame_width,
            WINDOW_HEIGHT / 2.0 - SPRITE_SCALE * 0.5 * idle.frame_height,
        );
        Self {
            agent: Agent::new(idle, run, world_pos, PLAYER_SPEED, PLAYER_MAX_HEALTH),
            screen_pos,
            weapon,
        }
    }

    #[inline]
    pub fn view(&self) -> ScreenSpace {
        ScreenSpace::Pinned(self.screen_pos)
    }

    #[inline]
    pub fn screen_pos(&self) -> Vec2 {
        self.screen_pos
    }

    pub fn collision_rect(&self) -> Rect {
        self.agent.collision_rect(self.view())
    }

    /// Weapon rectangle beside the knight, mirrored by facing
    pub fn weapon_rect(&self) -> Rect {
        let size = self.weapon.scaled_size(self.agent.scale);
        let y = self.screen_pos.y + WEAPON_OFFSET_Y - size.y;
        match self.agent.facing {
            Facing::Right => Rect::new(self.screen_pos.x + WEAPON_OFFSET_X_RIGHT, y, size.x, size.y),
            Facing::Left => {
                Rect::new(self.screen_pos.x + WEAPON_OFFSET_X_LEFT - size.x, y, size.x, size.y)
            }
        }
    }

    /// Advance the knight one tick and draw knight + weapon
    pub fn tick(&mut self, intent: Vec2, attack: bool, dt: f32, draws: &mut Vec<SpriteDraw>) {
        self.agent.intent = intent;
        self.agent.tick(dt, self.view(), draws);

        let flip = self.agent.facing.flip_sign();
        draws.push(SpriteDraw {
            texture: self.weapon.texture,
            source: Rect::new(0.0, 0.0, flip * self.weapon.frame_width, self.weapon.frame_height),
            dest: self.weapon_rect(),
            rotation: if attack { WEAPON_SWING_DEG * flip } else { 0.0 },
            tint: Tint::WHITE,
        });
    }
}

/// A static obstacle; never moves, never takes damage
#[derive(Debug, Clone, Copy)]
pub struct Prop {
    pub world_pos: Vec2,
    pub texture: TextureHandle,
    pub scale: f32,
}

impl Prop {
    pub fn new(world_pos: Vec2, texture: TextureHandle, scale: f32) -> Self {
        Self {
            world_pos,
            texture,
            scale,
        }
    }

    pub fn collision_rect(&self, camera: Camera) -> Rect {
        Rect::at(
            camera.to_screen(self.world_pos),
            Vec2::new(self.texture.width, self.texture.height) * self.scale,
        )
    }

    pub fn draw(&self, camera: Camera, draws: &mut Vec<SpriteDraw>) {
        draws.push(SpriteDraw {
            texture: self.texture,
            source: Rect::new(0.0, 0.0, self.texture.width, self.texture.height),
            dest: self.collision_rect(camera),
            rotation: 0.0,
            tint: Tint::WHITE,
        });
    }
}

/// Configured world extents the player may not leave
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
    pub window: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, world_size: Vec2, window: Vec2) -> Self {
        Self {
            min,
            max: world_size,
            window,
        }
    }

    /// True while a viewport anchored at `pos` stays on the map
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.min.x
            && pos.y >= self.min.y
            && (pos.x + self.window.x) * BOUNDS_SLACK <= self.max.x
            && (pos.y + self.window.y) * BOUNDS_SLACK <= self.max.y
    }
}

/// Complete game state, owned and advanced by [`crate::sim::tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub props: Vec<Prop>,
    pub bounds: WorldBounds,
    /// Elapsed time toward the next timer-driven spawn
    pub spawn_timer: f32,
    /// One-shot events since the shell last drained them
    pub events: Vec<GameEvent>,
    /// Draw commands for the current frame, rebuilt every tick
    pub draws: Vec<SpriteDraw>,
    pub assets: WorldAssets,
    rng: Pcg32,
}

impl GameState {
    /// Build the world: knight at the origin, six props, and the initial
    /// enemy batch placed through the ordinary spawn operation
    pub fn new(seed: u64, assets: WorldAssets) -> Self {
        let player = Player::new(
            Vec2::ZERO,
            assets.knight_idle,
            assets.knight_run,
            assets.weapon,
        );

        let props = vec![
            Prop::new(Vec2::new(800.0, 1200.0), assets.rock, 7.0),
            Prop::new(Vec2::new(1450.0, 950.0), assets.sign, 4.0),
            Prop::new(Vec2::new(1800.0, 1650.0), assets.rock, 10.0),
            Prop::new(Vec2::new(600.0, 700.0), assets.log, 6.0),
            Prop::new(Vec2::new(1500.0, 300.0), assets.log, 5.0),
            Prop::new(Vec2::new(2100.0, 500.0), assets.rock, 6.5),
        ];

        let bounds = WorldBounds::new(
            Vec2::new(WORLD_MIN_X, WORLD_MIN_Y),
            Vec2::new(assets.map.width, assets.map.height) * MAP_SCALE,
            Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        );

        let mut state = Self {
            seed,
            phase: GamePhase::Title,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            props,
            bounds,
            spawn_timer: 0.0,
            events: Vec::new(),
            draws: Vec::new(),
            assets,
            rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..INITIAL_ENEMY_COUNT {
            state.spawn_enemy();
        }

        state
    }

    /// Construct one enemy of a uniformly random kind, position, and speed,
    /// targeted at the player, and append it to the population
    pub fn spawn_enemy(&mut self) {
        let kind = EnemyKind::ALL[self.rng.random_range(0..EnemyKind::ALL.len())];
        let pos = Vec2::new(
            self.rng.random_range(SPAWN_MIN_X..=SPAWN_MAX_X),
            self.rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y),
        );
        let speed = self.rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);

        let (idle, run) = self.assets.enemy_sheets(kind);
        log::debug!(
            "spawned {:?} at ({:.0}, {:.0}), speed {:.1}",
            kind,
            pos.x,
            pos.y,
            speed
        );
        self.enemies.push(Enemy::new(kind, pos, idle, run, speed));
        self.events.push(GameEvent::EnemySpawned(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(id: u32) -> SpriteSheet {
        SpriteSheet::new(TextureHandle::new(id, 192.0, 32.0), 6)
    }

    fn assets() -> WorldAssets {
        WorldAssets {
            map: TextureHandle::new(0, 1024.0, 1024.0),
            knight_idle: sheet(1),
            knight_run: sheet(2),
            weapon: SpriteSheet::new(TextureHandle::new(3, 32.0, 32.0), 1),
            goblin_idle: sheet(4),
            goblin_run: sheet(5),
            slime_idle: sheet(6),
            slime_run: sheet(7),
            devourer_idle: sheet(8),
            rock: TextureHandle::new(9, 32.0, 32.0),
            sign: TextureHandle::new(10, 32.0, 32.0),
            log: TextureHandle::new(11, 48.0, 24.0),
        }
    }

    #[test]
    fn test_new_world_layout() {
        let state = GameState::new(7, assets());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.enemies.len(), INITIAL_ENEMY_COUNT as usize);
        assert_eq!(state.props.len(), 6);
        assert_eq!(state.player.agent.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_spawns_are_deterministic_per_seed() {
        let mut a = GameState::new(42, assets());
        let mut b = GameState::new(42, assets());
        a.spawn_enemy();
        b.spawn_enemy();

        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.agent.world_pos, eb.agent.world_pos);
            assert_eq!(ea.agent.speed, eb.agent.speed);
        }
    }

    #[test]
    fn test_spawn_respects_region_and_speed_range() {
        let mut state = GameState::new(123, assets());
        for _ in 0..100 {
            state.spawn_enemy();
        }
        for e in &state.enemies {
            let p = e.agent.world_pos;
            assert!((SPAWN_MIN_X..=SPAWN_MAX_X).contains(&p.x));
            assert!((SPAWN_MIN_Y..=SPAWN_MAX_Y).contains(&p.y));
            assert!((ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED).contains(&e.agent.speed));
        }
    }

    #[test]
    fn test_spawn_records_event() {
        let mut state = GameState::new(5, assets());
        state.events.clear();
        state.spawn_enemy();
        assert_eq!(state.events.len(), 1);
        assert!(matches!(state.events[0], GameEvent::EnemySpawned(_)));
    }

    #[test]
    fn test_world_bounds() {
        let bounds = WorldBounds::new(
            Vec2::new(-130.0, -100.0),
            Vec2::new(4096.0, 4096.0),
            Vec2::new(682.0, 576.0),
        );

        assert!(bounds.contains(Vec2::new(0.0, 0.0)));
        assert!(bounds.contains(Vec2::new(2000.0, 2000.0)));
        assert!(!bounds.contains(Vec2::new(-131.0, 0.0)));
        assert!(!bounds.contains(Vec2::new(0.0, -101.0)));
        assert!(!bounds.contains(Vec2::new(4000.0, 2000.0)));
        assert!(!bounds.contains(Vec2::new(2000.0, 4000.0)));
    }

    #[test]
    fn test_weapon_rect_mirrors_with_facing() {
        let mut player = Player::new(Vec2::ZERO, sheet(1), sheet(2), assets().weapon);

        player.agent.facing = Facing::Right;
        let right = player.weapon_rect();
        player.agent.facing = Facing::Left;
        let left = player.weapon_rect();

        assert_eq!(right.w, left.w);
        assert_eq!(right.h, left.h);
        assert_eq!(right.y, left.y);
        assert!(left.x < right.x);
    }

    #[test]
    fn test_enemy_sheets_share_textures() {
        let a = assets();
        assert_eq!(a.enemy_sheets(EnemyKind::EliteGoblin), a.enemy_sheets(EnemyKind::Goblin));
        assert_eq!(a.enemy_sheets(EnemyKind::SlimeKing), a.enemy_sheets(EnemyKind::Slime));
        let (idle, run) = a.enemy_sheets(EnemyKind::IntellectDevourer);
        assert_eq!(idle, run);
    }
}
