//! The window: sprite registry, callback table and the main loop
//!
//! The main loop blocks the calling thread, so register every callback and
//! sprite before calling [`Window::start`].

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use super::vertex::DrawList;
use crate::consts::{MAX_FRAME_RATE, MIN_FRAME_RATE};
use crate::error::{Error, Result};
use crate::platform::Platform;

/// A keyboard key as seen by the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Printable key, stored upper-case
    Char(char),
    Escape,
}

impl Key {
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_uppercase())
    }
}

/// Raw input coming from the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Window close request
    Quit,
    MouseMotion(Vec2),
    MouseClick(Vec2),
    KeyDown(Key),
}

impl Event {
    /// The callback slot this event dispatches to (`None` for motion)
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Event::Quit => Some(EventKind::Quit),
            Event::MouseMotion(_) => None,
            Event::MouseClick(_) => Some(EventKind::MouseClick),
            Event::KeyDown(key) => Some(EventKind::Key(*key)),
        }
    }
}

/// Callback slot; each slot holds at most one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Quit,
    MouseClick,
    Key(Key),
}

/// Receives the actions the window dispatches and the per-frame update
pub trait EventHandler<A> {
    fn on_action(&mut self, window: &mut Window<A>, action: A, event: &Event) -> Result<()>;

    fn on_frame(&mut self, window: &mut Window<A>, delta: f32) -> Result<()>;
}

#[derive(Debug)]
struct SpriteEntry {
    name: String,
    zindex: i32,
    sprite: Sprite,
}

/// Window state independent of the toolkit that shows it
#[derive(Debug)]
pub struct Window<A> {
    window_size: (u32, u32),
    draw_area: (u32, u32),
    frame_rate: u32,
    running: bool,
    mouse: Vec2,
    callbacks: HashMap<EventKind, A>,
    /// Sorted by zindex, highest (furthest back) first
    sprites: Vec<SpriteEntry>,
}

impl<A: Clone> Window<A> {
    /// Create a window. `draw_area` defaults to the full window.
    pub fn new(window_size: (u32, u32), draw_area: Option<(u32, u32)>, frame_rate: u32) -> Result<Self> {
        let mut window = Self {
            window_size,
            draw_area: draw_area.unwrap_or(window_size),
            frame_rate: MAX_FRAME_RATE,
            running: false,
            mouse: Vec2::ZERO,
            callbacks: HashMap::new(),
            sprites: Vec::new(),
        };
        window.set_frame_rate(frame_rate)?;
        Ok(window)
    }

    /// Width and height in pixels
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Area in which sprites are drawn
    pub fn draw_area(&self) -> (u32, u32) {
        self.draw_area
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) -> Result<()> {
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&frame_rate) {
            return Err(Error::InvalidFrameRate(frame_rate));
        }
        self.frame_rate = frame_rate;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mark the window as running. [`Window::start`] does this itself.
    pub fn open(&mut self) {
        self.running = true;
    }

    /// Ask the main loop to finish after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Last known mouse position
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    /// Add a sprite under `name`, replacing any sprite with the same name.
    /// Higher `zindex` values are sent to the back.
    pub fn add_sprite(&mut self, name: impl Into<String>, sprite: impl Into<Sprite>, zindex: i32) {
        let name = name.into();
        let sprite = sprite.into();

        match self.sprites.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.zindex = zindex;
                entry.sprite = sprite;
            }
            None => self.sprites.push(SpriteEntry {
                name,
                zindex,
                sprite,
            }),
        }

        // Stable sort keeps insertion order within a layer
        self.sprites.sort_by(|a, b| b.zindex.cmp(&a.zindex));
    }

    /// Remove a sprite by name. Unknown names are ignored.
    pub fn remove_sprite(&mut self, name: &str) -> Option<Sprite> {
        let index = self.sprites.iter().position(|e| e.name == name)?;
        Some(self.sprites.remove(index).sprite)
    }

    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.sprites.iter().find(|e| e.name == name).map(|e| &e.sprite)
    }

    pub fn sprite_mut(&mut self, name: &str) -> Option<&mut Sprite> {
        self.sprites
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| &mut e.sprite)
    }

    /// Sprite names in draw order
    pub fn sprite_names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|e| e.name.as_str())
    }

    /// Register the action fired when an event of `kind` occurs.
    /// A later registration for the same kind replaces the earlier one.
    pub fn on_callback(&mut self, kind: EventKind, action: A) {
        self.callbacks.insert(kind, action);
    }

    /// Remove a registered callback, returning its action
    pub fn remove_callback(&mut self, kind: EventKind) -> Option<A> {
        self.callbacks.remove(&kind)
    }

    pub fn callback(&self, kind: EventKind) -> Option<&A> {
        self.callbacks.get(&kind)
    }

    /// Handle one GUI event, returning the action registered for it
    pub fn event(&mut self, event: &Event) -> Option<A> {
        match event {
            Event::Quit => self.running = false,
            Event::MouseMotion(pos) | Event::MouseClick(pos) => self.mouse = *pos,
            Event::KeyDown(_) => {}
        }

        let kind = event.kind()?;
        self.callbacks.get(&kind).cloned()
    }

    /// Tessellate all sprites, back to front
    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        for entry in &self.sprites {
            entry.sprite.draw(&mut list);
        }
        list
    }

    /// Run one loop iteration: dispatch `events`, then the frame update
    pub fn step<H: EventHandler<A>>(&mut self, events: &[Event], delta: f32, handler: &mut H) -> Result<()> {
        for event in events {
            if let Some(action) = self.event(event) {
                handler.on_action(self, action, event)?;
            }
        }
        handler.on_frame(self, delta)
    }

    /// The main loop. Blocks until a quit event arrives or `stop` is called.
    pub fn start<P: Platform, H: EventHandler<A>>(&mut self, platform: &mut P, handler: &mut H) -> Result<()> {
        self.open();
        log::debug!(
            "Main loop starting at {} fps with sprites [{}]",
            self.frame_rate,
            self.sprite_names().collect::<Vec<_>>().join(", ")
        );
        let mut delta = 0.0;

        while self.running {
            let events = platform.poll_events()?;
            self.step(&events, delta, handler)?;

            platform.present(&self.draw())?;

            // cap at the given frame rate
            delta = platform.wait_frame(self.frame_rate);
        }

        log::info!("Graphics has stopped.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::sprite::{RobotSprite, Text};

    fn window() -> Window<u8> {
        Window::new((800, 600), None, 60).expect("valid window")
    }

    #[test]
    fn test_frame_rate_bounds() {
        let mut w = window();
        assert!(w.set_frame_rate(1).is_ok());
        assert!(w.set_frame_rate(60).is_ok());
        assert!(matches!(w.set_frame_rate(0), Err(Error::InvalidFrameRate(0))));
        assert!(matches!(w.set_frame_rate(61), Err(Error::InvalidFrameRate(61))));
        assert_eq!(w.frame_rate(), 60);

        assert!(Window::<u8>::new((800, 600), None, 120).is_err());
    }

    #[test]
    fn test_draw_area_defaults_to_window() {
        let w = window();
        assert_eq!(w.draw_area(), (800, 600));
        let w = Window::<u8>::new((800, 600), Some((400, 300)), 30).unwrap();
        assert_eq!(w.draw_area(), (400, 300));
    }

    #[test]
    fn test_sprites_sorted_back_to_front() {
        let mut w = window();
        w.add_sprite("front", Text::new("a", Vec2::ZERO, 10.0, [1.0; 4]), 0);
        w.add_sprite("back", Text::new("b", Vec2::ZERO, 10.0, [1.0; 4]), 5);
        w.add_sprite("front2", Text::new("c", Vec2::ZERO, 10.0, [1.0; 4]), 0);
        assert_eq!(w.sprite_names().collect::<Vec<_>>(), ["back", "front", "front2"]);

        let texts: Vec<_> = w.draw().texts.into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["b", "a", "c"]);

        // Re-adding moves it to the new layer
        w.add_sprite("front", Text::new("a", Vec2::ZERO, 10.0, [1.0; 4]), 9);
        assert_eq!(w.sprite_names().next(), Some("front"));
        assert_eq!(w.sprite_names().count(), 3);
    }

    #[test]
    fn test_remove_sprite() {
        let mut w = window();
        w.add_sprite("robot", RobotSprite::new(Vec2::ZERO, 50.0, [1.0; 4]), 0);
        assert!(w.remove_sprite("robot").is_some());
        assert!(w.remove_sprite("robot").is_none());
        assert!(w.draw().is_empty());
    }

    #[test]
    fn test_one_callback_per_kind() {
        let mut w = window();
        let r = EventKind::Key(Key::char('r'));
        w.on_callback(r, 1);
        w.on_callback(r, 2);
        assert_eq!(w.event(&Event::KeyDown(Key::Char('R'))), Some(2));
        assert_eq!(w.remove_callback(r), Some(2));
        assert_eq!(w.remove_callback(r), None);
        assert_eq!(w.event(&Event::KeyDown(Key::Char('R'))), None);
    }

    #[test]
    fn test_mouse_events_track_position() {
        let mut w = window();
        assert_eq!(w.event(&Event::MouseMotion(Vec2::new(5.0, 6.0))), None);
        assert_eq!(w.mouse_position(), Vec2::new(5.0, 6.0));

        w.on_callback(EventKind::MouseClick, 7);
        assert_eq!(w.event(&Event::MouseClick(Vec2::new(1.0, 2.0))), Some(7));
        assert_eq!(w.mouse_position(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_quit_stops_and_fires_callback() {
        let mut w = window();
        w.running = true;
        assert_eq!(w.event(&Event::Quit), None);
        assert!(!w.is_running());

        w.running = true;
        w.on_callback(EventKind::Quit, 3);
        assert_eq!(w.event(&Event::Quit), Some(3));
        assert!(!w.is_running());
    }
}
