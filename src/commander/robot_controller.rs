//! Robot placement (creator mode) and manual motor control (manual mode)

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sub_controller::{SubController, Toggle, set_label_color};
use super::{Action, AppMode, Entity, Nudge};
use crate::consts::*;
use crate::error::Result;
use crate::graphics::{Anchor, Event, EventKind, RobotSprite, Sprite, Text, Window};
use crate::motion::DiffDrive;
use crate::rgb;
use crate::settings::Settings;

pub const SPRITE_NAME: &str = "sprite_robot";
pub const LABEL_NAME: &str = "text_robot";
const LABEL: &str = "'R' Place the robot";

/// Persisted robot pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotRecord {
    pub x: f64,
    pub y: f64,
    /// Degrees
    pub direction: f64,
}

#[derive(Debug)]
pub struct RobotController {
    mode: AppMode,
    toggle: Toggle,
    motor_step: f32,
    /// Shared with anything else that drives the robot; every
    /// read-modify-write of the wheel speeds happens under this lock
    model: Arc<Mutex<DiffDrive>>,
    /// Pose from the last loaded record, reported verbatim until the robot
    /// is moved again
    loaded: Option<RobotRecord>,
}

impl RobotController {
    /// Create the robot sprite off-screen and register this mode's shortcuts
    pub fn new(window: &mut Window<Action>, settings: &Settings, mode: AppMode) -> Self {
        let start = Vec2::splat(-ROBOT_SIZE * 2.0);
        let model = DiffDrive::new(start, ROBOT_SIZE).with_step(settings.motor_step);

        window.add_sprite(SPRITE_NAME, RobotSprite::new(start, ROBOT_SIZE, rgb(ROBOT_COLOR)), 0);

        let keys = &settings.keys;
        match mode {
            AppMode::Creator => {
                let (_, height) = window.window_size();
                let mut label = Text::new(LABEL, Vec2::ZERO, SHORTCUT_TEXT_SIZE, rgb(SHORTCUT_TEXT_COLOR));
                label.set_position(Vec2::new(20.0, height as f32 - 130.0), Anchor::TopLeft);
                window.add_sprite(LABEL_NAME, label, 0);

                window.on_callback(
                    EventKind::Key(keys.place_robot),
                    Action::TogglePlacement(Entity::Robot),
                );
            }
            AppMode::Manual => {
                let bindings = [
                    (keys.left_increase, Nudge::Increase, Nudge::Hold),
                    (keys.left_decrease, Nudge::Decrease, Nudge::Hold),
                    (keys.right_increase, Nudge::Hold, Nudge::Increase),
                    (keys.right_decrease, Nudge::Hold, Nudge::Decrease),
                    (keys.both_increase, Nudge::Increase, Nudge::Increase),
                ];
                for (key, left, right) in bindings {
                    window.on_callback(EventKind::Key(key), Action::Motor { left, right });
                }
            }
        }

        Self {
            mode,
            toggle: Toggle::default(),
            motor_step: settings.motor_step,
            model: Arc::new(Mutex::new(model)),
            loaded: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DiffDrive> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn motor_left(&self, nudge: Nudge) {
        let mut model = self.lock();
        match nudge {
            Nudge::Increase => model.accelerate_left(),
            Nudge::Decrease => model.slowdown_left(),
            Nudge::Hold => {}
        }
    }

    fn motor_right(&self, nudge: Nudge) {
        let mut model = self.lock();
        match nudge {
            Nudge::Increase => model.accelerate_right(),
            Nudge::Decrease => model.slowdown_right(),
            Nudge::Hold => {}
        }
    }

    fn on_mouse_click(&mut self, window: &mut Window<Action>, pos: Vec2) {
        if let Some(sprite) = robot_sprite_mut(window) {
            sprite.set_position(pos);
        }
        self.loaded = None;
        log::debug!("Robot placed at ({}, {})", pos.x, pos.y);
        self.toggle(window);
    }
}

fn robot_sprite_mut(window: &mut Window<Action>) -> Option<&mut RobotSprite> {
    window.sprite_mut(SPRITE_NAME).and_then(|s| s.as_robot_mut())
}

impl SubController for RobotController {
    fn entity(&self) -> Entity {
        Entity::Robot
    }

    fn is_toggled(&self) -> bool {
        self.toggle.is_on()
    }

    /// In creator mode the robot's position can be changed while toggled:
    /// the next mouse click commits it.
    fn toggle(&mut self, window: &mut Window<Action>) {
        if self.toggle.flip() {
            window.on_callback(EventKind::MouseClick, Action::Place(Entity::Robot));
            set_label_color(window, LABEL_NAME, SHORTCUT_TEXT_COLOR_ACTIVE);
        } else {
            window.remove_callback(EventKind::MouseClick);
            set_label_color(window, LABEL_NAME, SHORTCUT_TEXT_COLOR);
        }
    }

    fn handle(&mut self, window: &mut Window<Action>, action: &Action, event: &Event) -> Result<()> {
        match (action, event) {
            (Action::Place(Entity::Robot), Event::MouseClick(pos)) if self.is_toggled() => {
                self.on_mouse_click(window, *pos);
            }
            (Action::Motor { left, right }, _) => {
                self.motor_left(*left);
                self.motor_right(*right);
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self, window: &mut Window<Action>, delta: f32) {
        if self.is_toggled() {
            let mouse = window.mouse_position();
            if let Some(sprite) = robot_sprite_mut(window) {
                sprite.set_position(mouse);
            }
            self.loaded = None;
        }

        if self.mode != AppMode::Creator {
            let (moving, (angle, x, y)) = {
                let mut model = self.lock();
                model.set_time_delta(delta);
                (delta > 0.0 && model.wheel_speeds() != (0.0, 0.0), model.drive())
            };
            if moving {
                self.loaded = None;
            }

            if let Some(sprite) = robot_sprite_mut(window) {
                sprite.set_position(Vec2::new(x, y));
                sprite.set_direction(angle);
            }
        }
    }

    fn to_record(&self, window: &Window<Action>) -> Result<Value> {
        if let Some(record) = self.loaded {
            return Ok(serde_json::to_value(record)?);
        }

        let record = match window.sprite(SPRITE_NAME) {
            Some(Sprite::Robot(sprite)) => RobotRecord {
                x: sprite.position().x as f64,
                y: sprite.position().y as f64,
                direction: sprite.direction() as f64,
            },
            _ => {
                let model = self.lock();
                RobotRecord {
                    x: model.position().x as f64,
                    y: model.position().y as f64,
                    direction: model.heading_degrees() as f64,
                }
            }
        };
        Ok(serde_json::to_value(record)?)
    }

    fn from_record(&mut self, window: &mut Window<Action>, record: &Value) -> Result<()> {
        let record: RobotRecord = serde_json::from_value(record.clone())?;
        let pos = Vec2::new(record.x as f32, record.y as f32);
        let direction = record.direction as f32;

        if let Some(sprite) = robot_sprite_mut(window) {
            sprite.set_position(pos);
            sprite.set_direction(direction);
        }

        *self.lock() = DiffDrive::new(pos, ROBOT_SIZE)
            .with_heading(direction)
            .with_step(self.motor_step);
        self.loaded = Some(record);
        Ok(())
    }
}
