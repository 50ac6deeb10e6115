//! Goal placement shortcut
//!
//! The goal has no marker or pose yet; its record is always empty.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sub_controller::{SubController, Toggle, set_label_color};
use super::{Action, AppMode, Entity};
use crate::consts::*;
use crate::error::Result;
use crate::graphics::{Anchor, Event, EventKind, Text, Window};
use crate::rgb;
use crate::settings::Settings;

pub const LABEL_NAME: &str = "text_goal";
const LABEL: &str = "'G' Place the goal";

/// Persisted goal (no fields)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {}

#[derive(Debug)]
pub struct GoalController {
    toggle: Toggle,
}

impl GoalController {
    pub fn new(window: &mut Window<Action>, settings: &Settings, mode: AppMode) -> Self {
        if mode == AppMode::Creator {
            let (_, height) = window.window_size();
            let mut label = Text::new(LABEL, Vec2::ZERO, SHORTCUT_TEXT_SIZE, rgb(SHORTCUT_TEXT_COLOR));
            label.set_position(Vec2::new(20.0, height as f32 - 70.0), Anchor::TopLeft);
            window.add_sprite(LABEL_NAME, label, 0);

            window.on_callback(
                EventKind::Key(settings.keys.place_goal),
                Action::TogglePlacement(Entity::Goal),
            );
        }

        Self {
            toggle: Toggle::default(),
        }
    }
}

impl SubController for GoalController {
    fn entity(&self) -> Entity {
        Entity::Goal
    }

    fn is_toggled(&self) -> bool {
        self.toggle.is_on()
    }

    fn toggle(&mut self, window: &mut Window<Action>) {
        let color = if self.toggle.flip() {
            SHORTCUT_TEXT_COLOR_ACTIVE
        } else {
            SHORTCUT_TEXT_COLOR
        };
        set_label_color(window, LABEL_NAME, color);
    }

    fn handle(&mut self, _window: &mut Window<Action>, _action: &Action, _event: &Event) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, _window: &mut Window<Action>, _delta: f32) {}

    fn to_record(&self, _window: &Window<Action>) -> Result<Value> {
        Ok(serde_json::to_value(GoalRecord::default())?)
    }

    fn from_record(&mut self, _window: &mut Window<Action>, record: &Value) -> Result<()> {
        let _: GoalRecord = serde_json::from_value(record.clone())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Key, Sprite};

    fn setup(mode: AppMode) -> (Window<Action>, GoalController) {
        let mut window = Window::new((800, 600), None, 60).unwrap();
        let goal = GoalController::new(&mut window, &Settings::default(), mode);
        (window, goal)
    }

    #[test]
    fn test_creator_label_and_shortcut() {
        let (window, _) = setup(AppMode::Creator);
        assert_eq!(
            window.callback(EventKind::Key(Key::Char('G'))),
            Some(&Action::TogglePlacement(Entity::Goal))
        );
        assert_eq!(window.sprite(LABEL_NAME).map(Sprite::position), Some(Vec2::new(20.0, 530.0)));
    }

    #[test]
    fn test_manual_has_no_goal_shortcut() {
        let (window, _) = setup(AppMode::Manual);
        assert!(window.sprite(LABEL_NAME).is_none());
        assert!(window.callback(EventKind::Key(Key::Char('G'))).is_none());
    }

    #[test]
    fn test_toggle_twice_restores_visual_state() {
        let (mut window, mut goal) = setup(AppMode::Creator);
        let before = window.sprite(LABEL_NAME).cloned();

        goal.toggle(&mut window);
        assert!(goal.is_toggled());
        assert_ne!(window.sprite(LABEL_NAME).cloned(), before);

        goal.toggle(&mut window);
        assert!(!goal.is_toggled());
        assert_eq!(window.sprite(LABEL_NAME).cloned(), before);
    }

    #[test]
    fn test_record_is_empty_object() {
        let (mut window, mut goal) = setup(AppMode::Creator);
        assert_eq!(goal.to_record(&window).unwrap(), serde_json::json!({}));
        assert!(goal.from_record(&mut window, &serde_json::json!({})).is_ok());
        assert!(goal.from_record(&mut window, &serde_json::json!(3)).is_err());
    }
}
