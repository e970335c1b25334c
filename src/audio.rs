//! Audio cue routing
//!
//! The simulation never touches a sound device; it emits events. This module
//! maps drained events onto one-shot cues and keeps the per-phase theme
//! looping, through whatever backend the shell provides. Sound handles are
//! opaque references to sounds the shell has already loaded.

use crate::sim::state::{GameEvent, GamePhase};

/// Opaque reference to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Title screen theme (loops)
    TitleTheme,
    /// Gameplay theme (loops)
    FieldTheme,
    /// Weapon swing
    AttackSwing,
    /// An enemy went down
    EnemyFelled,
    /// Defeat knell (loops while the defeat screen shows)
    DefeatKnell,
    /// Victory fanfare (loops on the victory screen)
    VictoryFanfare,
}

/// Playback capability supplied by the shell
///
/// `play` restarts the sound from the beginning; `is_playing` reports
/// whether a previous `play` is still audible.
pub trait AudioBackend {
    fn play(&mut self, sound: SoundHandle);
    fn is_playing(&self, sound: SoundHandle) -> bool;
    fn stop(&mut self, sound: SoundHandle);
}

/// Cue-to-handle table, filled by the shell at load time
#[derive(Debug, Clone, Copy)]
pub struct SoundBank {
    pub title_theme: SoundHandle,
    pub field_theme: SoundHandle,
    pub attack_swing: SoundHandle,
    pub enemy_felled: SoundHandle,
    pub defeat_knell: SoundHandle,
    pub victory_fanfare: SoundHandle,
}

impl SoundBank {
    fn handle(&self, cue: SoundCue) -> SoundHandle {
        match cue {
            SoundCue::TitleTheme => self.title_theme,
            SoundCue::FieldTheme => self.field_theme,
            SoundCue::AttackSwing => self.attack_swing,
            SoundCue::EnemyFelled => self.enemy_felled,
            SoundCue::DefeatKnell => self.defeat_knell,
            SoundCue::VictoryFanfare => self.victory_fanfare,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    bank: SoundBank,
    master_volume: f32,
    muted: bool,
    current_theme: Option<SoundCue>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, bank: SoundBank) -> Self {
        Self {
            backend,
            bank,
            master_volume: 0.8,
            muted: false,
            current_theme: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn silenced(&self) -> bool {
        self.muted || self.master_volume <= 0.0
    }

    /// Fire the one-shot cue for a drained event, if it has one
    pub fn handle_event(&mut self, event: &GameEvent) {
        if self.silenced() {
            return;
        }
        match event {
            GameEvent::AttackSwung => {
                self.backend.play(self.bank.handle(SoundCue::AttackSwing));
            }
            GameEvent::EnemyFelled(_) => {
                // The death cue must not restart while a previous one rings
                let handle = self.bank.handle(SoundCue::EnemyFelled);
                if !self.backend.is_playing(handle) {
                    self.backend.play(handle);
                }
            }
            // Phase themes are handled by `frame`; spawns are silent
            GameEvent::Started
            | GameEvent::EnemySpawned(_)
            | GameEvent::PlayerDefeated
            | GameEvent::Won => {}
        }
    }

    /// Keep the current phase's theme looping; call once per rendered frame
    pub fn frame(&mut self, phase: GamePhase) {
        let cue = match phase {
            GamePhase::Title => SoundCue::TitleTheme,
            GamePhase::Playing => SoundCue::FieldTheme,
            GamePhase::Defeat => SoundCue::DefeatKnell,
            GamePhase::Victory => SoundCue::VictoryFanfare,
        };

        if self.current_theme != Some(cue) {
            if let Some(previous) = self.current_theme {
                self.backend.stop(self.bank.handle(previous));
            }
            self.current_theme = Some(cue);
        }

        if self.silenced() {
            return;
        }

        // Restart the theme when the backend reports it has run out,
        // never on top of itself
        let handle = self.bank.handle(cue);
        if !self.backend.is_playing(handle) {
            self.backend.play(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundHandle>,
        playing: HashSet<SoundHandle>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, sound: SoundHandle) {
            self.played.push(sound);
            self.playing.insert(sound);
        }

        fn is_playing(&self, sound: SoundHandle) -> bool {
            self.playing.contains(&sound)
        }

        fn stop(&mut self, sound: SoundHandle) {
            self.playing.remove(&sound);
        }
    }

    fn bank() -> SoundBank {
        SoundBank {
            title_theme: SoundHandle(1),
            field_theme: SoundHandle(2),
            attack_swing: SoundHandle(3),
            enemy_felled: SoundHandle(4),
            defeat_knell: SoundHandle(5),
            victory_fanfare: SoundHandle(6),
        }
    }

    #[test]
    fn test_theme_plays_once_while_audible() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.frame(GamePhase::Title);
        audio.frame(GamePhase::Title);
        assert_eq!(audio.backend().played, vec![SoundHandle(1)]);
    }

    #[test]
    fn test_theme_restarts_after_running_out() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.frame(GamePhase::Playing);
        audio.backend.stop(SoundHandle(2));
        audio.frame(GamePhase::Playing);
        assert_eq!(audio.backend().played, vec![SoundHandle(2), SoundHandle(2)]);
    }

    #[test]
    fn test_phase_change_swaps_theme() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.frame(GamePhase::Playing);
        audio.frame(GamePhase::Defeat);

        assert_eq!(audio.backend().played, vec![SoundHandle(2), SoundHandle(5)]);
        assert!(!audio.backend().is_playing(SoundHandle(2)));
        assert!(audio.backend().is_playing(SoundHandle(5)));
    }

    #[test]
    fn test_felled_cue_does_not_restart_while_ringing() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.handle_event(&GameEvent::EnemyFelled(EnemyKind::Goblin));
        audio.handle_event(&GameEvent::EnemyFelled(EnemyKind::Slime));
        assert_eq!(audio.backend().played, vec![SoundHandle(4)]);
    }

    #[test]
    fn test_attack_cue_always_fires() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.handle_event(&GameEvent::AttackSwung);
        audio.handle_event(&GameEvent::AttackSwung);
        assert_eq!(audio.backend().played.len(), 2);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default(), bank());
        audio.set_muted(true);
        audio.frame(GamePhase::Playing);
        audio.handle_event(&GameEvent::AttackSwung);
        assert!(audio.backend().played.is_empty());
    }
}
