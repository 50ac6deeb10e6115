//! Robot Commander - place and drive a simulated robot on a 2D canvas
//!
//! Core modules:
//! - `graphics`: Window, sprites and toolkit-neutral draw lists
//! - `motion`: Differential-drive kinematic model
//! - `commander`: Main controller and the robot/goal sub-controllers
//! - `platform`: Adapters over the external graphics toolkit
//! - `persistence`: World document load/save
//! - `settings`: Window, key binding and color preferences

pub mod commander;
pub mod error;
pub mod graphics;
pub mod motion;
pub mod persistence;
pub mod platform;
pub mod settings;

pub use commander::{AppMode, Commander};
pub use error::{Error, Result};
pub use settings::{KeyBindings, Settings};

/// Application constants
pub mod consts {
    /// Default window dimensions in pixels
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;

    /// Default and allowed frame rates
    pub const DEFAULT_FRAME_RATE: u32 = 60;
    pub const MIN_FRAME_RATE: u32 = 1;
    pub const MAX_FRAME_RATE: u32 = 60;

    /// Robot marker diameter, also used as the wheel base
    pub const ROBOT_SIZE: f32 = 50.0;
    pub const ROBOT_COLOR: [u8; 3] = [160, 160, 200];

    /// Speed change per motor nudge (pixels/s)
    pub const MOTOR_STEP: f32 = 10.0;

    /// Shortcut labels
    pub const SHORTCUT_TEXT_SIZE: f32 = 30.0;
    pub const SHORTCUT_TEXT_COLOR: [u8; 3] = [150, 150, 150];
    pub const SHORTCUT_TEXT_COLOR_ACTIVE: [u8; 3] = [255, 220, 90];
}

/// Normalized angle to [-180, 180) degrees
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Convert an 8-bit RGB triple into a normalized RGBA color
#[inline]
pub fn rgb(color: [u8; 3]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb([255, 0, 0]), [1.0, 0.0, 0.0, 1.0]);
    }
}
