//! Application settings and preferences
//!
//! Stored as JSON next to the world files. Every field has a default, so a
//! partial or missing settings file is fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::graphics::Key;

/// Keyboard shortcuts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    // === Creator mode ===
    pub place_robot: Key,
    pub place_goal: Key,

    // === Manual mode ===
    pub left_increase: Key,
    pub left_decrease: Key,
    pub right_increase: Key,
    pub right_decrease: Key,
    pub both_increase: Key,

    pub quit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            place_robot: Key::Char('R'),
            place_goal: Key::Char('G'),

            left_increase: Key::Char('Q'),
            left_decrease: Key::Char('A'),
            right_increase: Key::Char('E'),
            right_decrease: Key::Char('D'),
            both_increase: Key::Char('W'),

            quit: Key::Escape,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    /// Area sprites are drawn in (defaults to the whole window)
    pub draw_area: Option<(u32, u32)>,
    /// Frames per second, 1 to 60
    pub frame_rate: u32,

    // === Robot ===
    /// Wheel speed change per motor nudge
    pub motor_step: f32,

    // === Input ===
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            draw_area: None,
            frame_rate: DEFAULT_FRAME_RATE,

            motor_step: MOTOR_STEP,

            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Check values the window would otherwise reject at start-up
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(Error::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }

    /// Load settings from `path`, falling back to defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"frame_rate": 30}"#).unwrap();
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.window_size(), (WINDOW_WIDTH, WINDOW_HEIGHT));
        assert_eq!(settings.keys, KeyBindings::default());
    }

    #[test]
    fn test_validate_frame_rate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.frame_rate = 0;
        assert!(matches!(settings.validate(), Err(Error::InvalidFrameRate(0))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.frame_rate = 24;
        settings.keys.place_robot = Key::Char('P');
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }
}
