//! Runtime settings
//!
//! Read from an optional JSON file; anything missing falls back to the
//! compile-time defaults in `consts`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::{GRAVITY, MAX_FRAME_TIME};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the random obstacle field and ball launch
    pub seed: u64,
    /// Downward acceleration applied to the ball
    pub gravity: f32,
    /// Upper bound on the frame time fed to the simulation
    pub max_frame_time: f32,
    /// Where the ball starts each session
    pub ball_start: Vec3,

    // === Audio ===
    /// Play a sound when the ball bounces
    pub sound_effects: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            gravity: GRAVITY,
            max_frame_time: MAX_FRAME_TIME,
            ball_start: Vec3::ZERO,
            sound_effects: false,
            master_volume: 0.25,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults if unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Volume actually handed to the audio backend (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_effects {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "gravity": 4.5 }"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.gravity, 4.5);
        assert_eq!(settings.max_frame_time, MAX_FRAME_TIME);
        assert_eq!(settings.ball_start, Vec3::ZERO);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            ball_start: Vec3::new(1.0, 2.0, 3.0),
            sound_effects: true,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ seed: }").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/bouncing-sphere.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 1.7,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
        settings.sound_effects = true;
        assert_eq!(settings.effective_volume(), 1.0);
    }
}
