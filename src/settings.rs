//! Game settings and preferences
//!
//! Loaded once at startup from an optional JSON file; anything missing or
//! malformed falls back to defaults. Game state itself is never persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Log the HUD line (health, population) once per second
    pub hud: bool,
    /// Run the attract-mode autopilot instead of reading input
    pub demo_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            hud: true,
            demo_mode: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.master_volume, 0.8);
        assert!(!s.muted);
        assert!(s.hud);
    }

    #[test]
    fn test_volume_clamps() {
        let mut s = Settings::default();
        s.set_master_volume(1.7);
        assert_eq!(s.master_volume, 1.0);
        s.set_master_volume(-0.5);
        assert_eq!(s.master_volume, 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.master_volume, 0.8);
        assert!(s.hud);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load_or_default(Path::new("/nonexistent/dune-clash.json"));
        assert_eq!(s.master_volume, 0.8);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.muted = true;
        s.master_volume = 0.25;
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, 0.25);
        assert!(back.muted);
    }
}
