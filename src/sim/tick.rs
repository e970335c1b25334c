//! Per-frame simulation step
//!
//! One strictly ordered pass: the knight moves, illegal moves are undone,
//! the mob pursues, the attack is resolved, the spawn timer runs, and the
//! terminal conditions are checked. Collision resolution is speculative
//! throughout - move first, test the new position, revert on violation.

use glam::Vec2;

use crate::consts::*;
use crate::render::{Camera, SpriteDraw, Tint};
use crate::sim::collision::Rect;
use crate::sim::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent for the knight (input-derived, any magnitude)
    pub move_dir: Vec2,
    /// Attack was pressed this frame (edge, not level)
    pub attack: bool,
    /// Start/confirm pressed (leaves the title screen)
    pub start: bool,
    /// Attract mode: the sim synthesizes its own input
    pub demo_mode: bool,
}

/// Advance the game state by one frame
///
/// Terminal phases freeze the simulation: the call returns immediately and
/// no agent is ticked, while the shell keeps rendering whatever it likes.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.draws.clear();

    match state.phase {
        GamePhase::Defeat | GamePhase::Victory => return,
        GamePhase::Title => {
            if input.start || input.demo_mode {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Started);
                log::info!("leaving the title screen, {} enemies afield", state.enemies.len());
            } else {
                return;
            }
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let mut input = input.clone();
    if input.demo_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    // Map and props are drawn with the camera as of the start of the frame
    let draw_camera = Camera::focused_on(state.player.agent.world_pos);
    let map = state.assets.map;
    state.draws.push(SpriteDraw {
        texture: map,
        source: Rect::new(0.0, 0.0, map.width, map.height),
        dest: Rect::at(draw_camera.offset(), Vec2::new(map.width, map.height) * MAP_SCALE),
        rotation: 0.0,
        tint: Tint::WHITE,
    });
    for prop in &state.props {
        prop.draw(draw_camera, &mut state.draws);
    }

    // The knight moves once, first; every overlap test below sees the same
    // player position
    state
        .player
        .tick(input.move_dir, input.attack, dt, &mut state.draws);

    if !state.bounds.contains(state.player.agent.world_pos) {
        state.player.agent.undo_movement();
    }

    let camera = Camera::focused_on(state.player.agent.world_pos);

    // Props block the knight and the mob alike
    for prop in &state.props {
        let rect = prop.collision_rect(camera);
        if rect.overlaps(&state.player.collision_rect()) {
            state.player.agent.undo_movement();
        }
        for enemy in &mut state.enemies {
            if rect.overlaps(&enemy.collision_rect(camera)) {
                enemy.agent.undo_movement();
            }
        }
    }

    let GameState {
        player,
        enemies,
        draws,
        events,
        ..
    } = state;

    // Pursuit. An enemy that ends its move inside the knight yields the
    // move; the knight is never pushed back by an enemy.
    for enemy in enemies.iter_mut() {
        enemy.tick(player, camera, dt, draws, events);
        if enemy.collision_rect(camera).overlaps(&player.collision_rect()) {
            enemy.agent.undo_movement();
        }
    }

    // Attack pass: fell and remove every enemy under the weapon, in one
    // order-preserving sweep
    if input.attack {
        events.push(GameEvent::AttackSwung);
        let weapon = player.weapon_rect();
        enemies.retain_mut(|enemy| {
            if enemy.collision_rect(camera).overlaps(&weapon) {
                enemy.agent.kill();
                events.push(GameEvent::EnemyFelled(enemy.kind));
                log::debug!("felled a {:?}", enemy.kind);
                false
            } else {
                true
            }
        });
    }

    // Timer-driven spawning
    state.spawn_timer += dt;
    if state.spawn_timer >= ENEMY_SPAWN_INTERVAL {
        state.spawn_enemy();
        state.spawn_timer = 0.0;
    }

    // Terminal conditions; the next tick will observe the phase and freeze
    if !state.player.agent.alive {
        state.phase = GamePhase::Defeat;
        state.events.push(GameEvent::PlayerDefeated);
        log::info!("the knight has fallen after {} ticks", state.time_ticks);
    } else if state.enemies.is_empty() {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Won);
        log::info!("the field is clear after {} ticks", state.time_ticks);
    }
}

/// Synthesized input for the attract loop: chase the nearest living enemy
/// and swing once it is within reach
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player_pos = state.player.agent.world_pos;
    let nearest = state
        .enemies
        .iter()
        .filter(|e| e.agent.alive)
        .min_by(|a, b| {
            let da = a.agent.world_pos.distance_squared(player_pos);
            let db = b.agent.world_pos.distance_squared(player_pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    match nearest {
        Some(enemy) => {
            let to_enemy = enemy.agent.world_pos - player_pos;
            input.move_dir = to_enemy.normalize_or_zero();
            input.attack = to_enemy.length() < DEMO_ATTACK_RANGE;
        }
        None => {
            input.move_dir = Vec2::ZERO;
            input.attack = false;
        }
    }
}
