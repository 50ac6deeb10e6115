//! Base behaviour shared by the entity controllers

use serde_json::Value;

use super::{Action, Entity};
use crate::error::Result;
use crate::graphics::{Event, Window};
use crate::rgb;

/// A controller for one placeable entity
///
/// Each controller owns a record in the world document (keyed by
/// [`Entity::record_name`]) and may own sprites and callbacks in the window.
pub trait SubController {
    fn entity(&self) -> Entity;

    fn is_toggled(&self) -> bool;

    /// Flip the controller's edit mode and update its visuals/callbacks
    fn toggle(&mut self, window: &mut Window<Action>);

    /// React to an action dispatched by the window. Actions meant for other
    /// controllers are ignored.
    fn handle(&mut self, window: &mut Window<Action>, action: &Action, event: &Event) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, window: &mut Window<Action>, delta: f32);

    fn to_record(&self, window: &Window<Action>) -> Result<Value>;

    fn from_record(&mut self, window: &mut Window<Action>, record: &Value) -> Result<()>;
}

/// Edit-mode flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    toggled: bool,
}

impl Toggle {
    /// Flip and return the new state
    pub fn flip(&mut self) -> bool {
        self.toggled = !self.toggled;
        self.toggled
    }

    pub fn is_on(&self) -> bool {
        self.toggled
    }
}

/// Recolor a shortcut label if it exists
pub(crate) fn set_label_color(window: &mut Window<Action>, name: &str, color: [u8; 3]) {
    if let Some(text) = window.sprite_mut(name).and_then(|s| s.as_text_mut()) {
        text.set_color(rgb(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        let mut toggle = Toggle::default();
        assert!(toggle.flip());
        assert!(!toggle.flip());
        assert_eq!(toggle, Toggle::default());
    }
}
