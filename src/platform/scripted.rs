//! Headless platform replaying a scripted input session
//!
//! Script files are JSON:
//!
//! ```json
//! {
//!   "steps": [
//!     { "frame": 1, "events": [{ "KeyDown": { "Char": "R" } }] },
//!     { "frame": 3, "events": [{ "MouseClick": [320.0, 240.0] }] }
//!   ],
//!   "quit_after": 10
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{FrameClock, Platform};
use crate::error::Result;
use crate::graphics::{DrawList, Event};

/// Events delivered at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u64,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A recorded input session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
    /// Frame at which a quit event is injected. Without it the session
    /// quits on the first frame after the last step.
    #[serde(default)]
    pub quit_after: Option<u64>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Append `events` at `frame`
    pub fn at(mut self, frame: u64, events: impl IntoIterator<Item = Event>) -> Self {
        self.steps.push(ScriptStep {
            frame,
            events: events.into_iter().collect(),
        });
        self
    }

    pub fn quit_after(mut self, frame: u64) -> Self {
        self.quit_after = Some(frame);
        self
    }

    fn last_frame(&self) -> u64 {
        self.steps.iter().map(|s| s.frame).max().unwrap_or(0)
    }
}

/// Replays a [`Script`] frame by frame and keeps the last presented frame
#[derive(Debug)]
pub struct ScriptedPlatform {
    script: Script,
    frame: u64,
    presented: u64,
    last_frame: Option<DrawList>,
    /// Sleep between frames like a real window would
    clock: Option<FrameClock>,
}

impl ScriptedPlatform {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            frame: 0,
            presented: 0,
            last_frame: None,
            clock: None,
        }
    }

    /// Pace frames in real time instead of running flat out
    pub fn realtime(mut self) -> Self {
        self.clock = Some(FrameClock::new());
        self
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&DrawList> {
        self.last_frame.as_ref()
    }

    fn quit_frame(&self) -> u64 {
        self.script
            .quit_after
            .unwrap_or_else(|| self.script.last_frame() + 1)
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .script
            .steps
            .iter()
            .filter(|s| s.frame == self.frame)
            .flat_map(|s| s.events.iter().copied())
            .collect();

        if self.frame >= self.quit_frame() {
            log::debug!("Script finished at frame {}", self.frame);
            events.push(Event::Quit);
        }

        Ok(events)
    }

    fn present(&mut self, frame: &DrawList) -> Result<()> {
        self.presented += 1;
        log::trace!(
            "frame {}: {} triangles, {} texts",
            self.frame,
            frame.triangle_count(),
            frame.texts.len()
        );
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn wait_frame(&mut self, frame_rate: u32) -> f32 {
        self.frame += 1;
        match self.clock.as_mut() {
            Some(clock) => clock.tick(frame_rate),
            None => 1.0 / frame_rate.max(1) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Key;
    use glam::Vec2;

    #[test]
    fn test_events_delivered_on_their_frame() {
        let script = Script::default()
            .at(0, [Event::KeyDown(Key::Char('R'))])
            .at(2, [Event::MouseClick(Vec2::new(1.0, 2.0))])
            .quit_after(5);
        let mut platform = ScriptedPlatform::new(script);

        assert_eq!(platform.poll_events().unwrap(), vec![Event::KeyDown(Key::Char('R'))]);
        assert!((platform.wait_frame(60) - 1.0 / 60.0).abs() < 1e-6);
        assert!(platform.poll_events().unwrap().is_empty());
        platform.wait_frame(60);
        assert_eq!(
            platform.poll_events().unwrap(),
            vec![Event::MouseClick(Vec2::new(1.0, 2.0))]
        );
    }

    #[test]
    fn test_quits_after_last_step_by_default() {
        let script = Script::default().at(1, [Event::KeyDown(Key::Escape)]);
        let mut platform = ScriptedPlatform::new(script);
        platform.wait_frame(60);
        assert!(!platform.poll_events().unwrap().contains(&Event::Quit));
        platform.wait_frame(60);
        assert_eq!(platform.poll_events().unwrap(), vec![Event::Quit]);
    }

    #[test]
    fn test_script_json_format() {
        let json = r#"{
            "steps": [
                { "frame": 1, "events": [{ "KeyDown": { "Char": "R" } }] },
                { "frame": 3, "events": [{ "MouseClick": [320.0, 240.0] }, "Quit"] }
            ],
            "quit_after": 10
        }"#;
        let script: Script = serde_json::from_str(json).unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[1].events[0], Event::MouseClick(Vec2::new(320.0, 240.0)));
        assert_eq!(script.steps[1].events[1], Event::Quit);
        assert_eq!(script.quit_after, Some(10));
    }
}
