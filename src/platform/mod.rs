//! Platform abstraction layer
//!
//! Adapters over the external graphics toolkit. A platform supplies input
//! events, presents the draw list and paces the loop:
//! - `scripted`: headless replay of a recorded input script
//! - `egui`: desktop window through eframe (feature `gui`)

pub mod scripted;

#[cfg(feature = "gui")]
pub mod egui;

pub use scripted::{Script, ScriptStep, ScriptedPlatform};

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::graphics::{DrawList, Event};

/// What the window's main loop needs from a toolkit
pub trait Platform {
    /// Drain the input events that arrived since the last call
    fn poll_events(&mut self) -> Result<Vec<Event>>;

    /// Show one finished frame
    fn present(&mut self, frame: &DrawList) -> Result<()>;

    /// Block until the next frame is due; returns the frame delta in seconds
    fn wait_frame(&mut self, frame_rate: u32) -> f32;
}

/// Limits the loop to a frame rate by sleeping out the rest of each frame
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Sleep until `1 / frame_rate` has passed since the previous tick.
    /// Returns the seconds elapsed since the previous tick.
    pub fn tick(&mut self, frame_rate: u32) -> f32 {
        let budget = Duration::from_secs_f32(1.0 / frame_rate.max(1) as f32);
        let spent = self.last.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_caps_rate() {
        let mut clock = FrameClock::new();
        let delta = clock.tick(50);
        assert!(delta >= 0.019);
    }
}
