//! Dune Clash entry point
//!
//! Headless demo shell: runs the simulation at a fixed timestep with the
//! attract-mode autopilot, routes drained events into the audio manager, and
//! logs a HUD line once per second. A graphical shell would consume
//! `state.draws` instead of counting it.

use std::collections::HashMap;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use dune_clash::audio::{AudioBackend, AudioManager, SoundBank, SoundHandle};
use dune_clash::consts::*;
use dune_clash::render::{SpriteSheet, TextureHandle};
use dune_clash::settings::Settings;
use dune_clash::sim::{GamePhase, GameState, TickInput, WorldAssets, tick};

/// Backend that logs playback and models sound lengths with wall time
struct PacedBackend {
    lengths: HashMap<SoundHandle, Duration>,
    started: HashMap<SoundHandle, Instant>,
}

impl PacedBackend {
    fn new(lengths: HashMap<SoundHandle, Duration>) -> Self {
        Self {
            lengths,
            started: HashMap::new(),
        }
    }
}

impl AudioBackend for PacedBackend {
    fn play(&mut self, sound: SoundHandle) {
        log::debug!("audio: play #{}", sound.0);
        self.started.insert(sound, Instant::now());
    }

    fn is_playing(&self, sound: SoundHandle) -> bool {
        match (self.started.get(&sound), self.lengths.get(&sound)) {
            (Some(started), Some(length)) => started.elapsed() < *length,
            _ => false,
        }
    }

    fn stop(&mut self, sound: SoundHandle) {
        self.started.remove(&sound);
    }
}

/// Demo asset catalog; a graphical shell would fill this from loaded files
fn world_assets() -> WorldAssets {
    let strip = |id, frames: u32| SpriteSheet::new(TextureHandle::new(id, frames as f32 * 32.0, 32.0), frames);
    WorldAssets {
        map: TextureHandle::new(100, 1024.0, 1024.0),
        knight_idle: strip(1, SPRITE_FRAMES),
        knight_run: strip(2, SPRITE_FRAMES),
        weapon: strip(3, 1),
        goblin_idle: strip(4, SPRITE_FRAMES),
        goblin_run: strip(5, SPRITE_FRAMES),
        slime_idle: strip(6, SPRITE_FRAMES),
        slime_run: strip(7, SPRITE_FRAMES),
        devourer_idle: strip(8, SPRITE_FRAMES),
        rock: TextureHandle::new(9, 32.0, 32.0),
        sign: TextureHandle::new(10, 32.0, 32.0),
        log: TextureHandle::new(11, 48.0, 24.0),
    }
}

fn sound_bank() -> SoundBank {
    SoundBank {
        title_theme: SoundHandle(1),
        field_theme: SoundHandle(2),
        attack_swing: SoundHandle(3),
        enemy_felled: SoundHandle(4),
        defeat_knell: SoundHandle(5),
        victory_fanfare: SoundHandle(6),
    }
}

fn sound_lengths() -> HashMap<SoundHandle, Duration> {
    HashMap::from([
        (SoundHandle(1), Duration::from_secs(24)),
        (SoundHandle(2), Duration::from_secs(96)),
        (SoundHandle(3), Duration::from_millis(400)),
        (SoundHandle(4), Duration::from_millis(800)),
        (SoundHandle(5), Duration::from_secs(6)),
        (SoundHandle(6), Duration::from_secs(8)),
    ])
}

/// Severity word for the HUD line
fn health_label(health: f32) -> &'static str {
    if health >= 75.0 {
        "fit"
    } else if health >= 45.0 {
        "worn"
    } else {
        "critical"
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let settings = Settings::load_or_default(Path::new("dune-clash.json"));

    log::info!("starting run with seed {seed}");
    let mut state = GameState::new(seed, world_assets());
    let mut audio = AudioManager::new(PacedBackend::new(sound_lengths()), sound_bank());
    audio.set_master_volume(settings.master_volume);
    audio.set_muted(settings.muted);

    let input = TickInput {
        demo_mode: settings.demo_mode,
        start: true,
        ..Default::default()
    };

    let mut last = Instant::now();
    let mut accumulator = 0.0f32;
    let mut last_hud = Instant::now();
    let mut terminal_since: Option<Instant> = None;

    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(MAX_FRAME_DT);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in state.events.drain(..) {
            log::debug!("event: {event:?}");
            audio.handle_event(&event);
        }
        audio.frame(state.phase);

        if settings.hud && last_hud.elapsed() >= Duration::from_secs(1) {
            last_hud = Instant::now();
            log::info!(
                "health {:>5.1} ({}), {} enemies afield",
                state.player.agent.health,
                health_label(state.player.agent.health),
                state.enemies.len(),
            );
        }

        // Terminal phases keep rendering (and looping their theme) for a
        // moment, then the demo shell exits
        if state.phase.is_terminal() {
            let since = *terminal_since.get_or_insert(now);
            if since.elapsed() >= Duration::from_secs(3) {
                match state.phase {
                    GamePhase::Victory => log::info!("victory - the field is clear"),
                    _ => log::info!("game over"),
                }
                break;
            }
        }

        thread::sleep(Duration::from_secs_f32(SIM_DT));
    }
}
