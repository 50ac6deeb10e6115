//! Main controller
//!
//! Owns the window and the entity controllers, routes dispatched actions,
//! keeps at most one placement mode active and assembles the world document.

pub mod goal_controller;
pub mod robot_controller;
pub mod sub_controller;

pub use goal_controller::{GoalController, GoalRecord};
pub use robot_controller::{RobotController, RobotRecord};
pub use sub_controller::{SubController, Toggle};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::graphics::{DrawList, Event, EventHandler, EventKind, Window};
use crate::persistence;
use crate::platform::Platform;
use crate::settings::Settings;

/// What the application is started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppMode {
    /// Place entities with keyboard shortcuts and mouse clicks
    #[default]
    Creator,
    /// Drive the robot by nudging its motors
    Manual,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Creator => "creator",
            AppMode::Manual => "manual",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creator" | "create" => Ok(AppMode::Creator),
            "manual" => Ok(AppMode::Manual),
            other => Err(format!("unknown mode `{other}` (expected creator or manual)")),
        }
    }
}

/// Placeable entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Robot,
    Goal,
}

impl Entity {
    /// Key of this entity's record in the world document
    pub fn record_name(&self) -> &'static str {
        match self {
            Entity::Robot => "robot",
            Entity::Goal => "goal",
        }
    }
}

/// One motor's reaction to a manual-control key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Increase,
    Decrease,
    Hold,
}

/// What a window callback asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Enter/leave placement mode for an entity
    TogglePlacement(Entity),
    /// Commit the clicked position for an entity
    Place(Entity),
    /// Nudge the robot's motors
    Motor { left: Nudge, right: Nudge },
    Quit,
}

/// The entity controllers plus application-level state
pub struct Controllers {
    subs: Vec<Box<dyn SubController>>,
    /// Where the world is saved on quit
    world_path: Option<PathBuf>,
}

impl Controllers {
    fn index_of(&self, entity: Entity) -> Option<usize> {
        self.subs.iter().position(|c| c.entity() == entity)
    }

    /// Toggle one controller. With `call` set, any other controller that is
    /// currently toggled is switched off (without `call`) first.
    pub fn toggle(&mut self, window: &mut Window<Action>, entity: Entity, call: bool) {
        let Some(index) = self.index_of(entity) else {
            return;
        };

        if call && !self.subs[index].is_toggled() {
            for (i, other) in self.subs.iter_mut().enumerate() {
                if i != index && other.is_toggled() {
                    log::debug!("Leaving {} placement", other.entity().record_name());
                    other.toggle(window);
                }
            }
        }

        self.subs[index].toggle(window);
        log::debug!(
            "{} placement {}",
            entity.record_name(),
            if self.subs[index].is_toggled() { "on" } else { "off" }
        );
    }

    fn save_on_quit(&self, window: &Window<Action>) -> Result<()> {
        if let Some(path) = &self.world_path {
            persistence::save(path, &self.to_document(window)?)?;
        }
        Ok(())
    }

    fn to_document(&self, window: &Window<Action>) -> Result<Value> {
        let mut document = Map::new();
        for sub in &self.subs {
            document.insert(sub.entity().record_name().to_string(), sub.to_record(window)?);
        }
        Ok(Value::Object(document))
    }

    fn from_document(&mut self, window: &mut Window<Action>, document: &Value) -> Result<()> {
        for sub in &mut self.subs {
            let name = sub.entity().record_name();
            let record = document
                .get(name)
                .ok_or_else(|| Error::MissingRecord(name.to_string()))?;
            sub.from_record(window, record)?;
        }
        Ok(())
    }
}

impl EventHandler<Action> for Controllers {
    fn on_action(&mut self, window: &mut Window<Action>, action: Action, event: &Event) -> Result<()> {
        match action {
            Action::TogglePlacement(entity) => self.toggle(window, entity, true),
            Action::Quit => {
                window.stop();
                self.save_on_quit(window)?;
            }
            Action::Place(_) | Action::Motor { .. } => {
                for sub in &mut self.subs {
                    sub.handle(window, &action, event)?;
                }
            }
        }
        Ok(())
    }

    fn on_frame(&mut self, window: &mut Window<Action>, delta: f32) -> Result<()> {
        for sub in &mut self.subs {
            sub.update(window, delta);
        }
        Ok(())
    }
}

/// The application: window plus controllers
pub struct Commander {
    mode: AppMode,
    window: Window<Action>,
    controllers: Controllers,
}

impl Commander {
    pub fn new(settings: &Settings, mode: AppMode) -> Result<Self> {
        let mut window = Window::new(settings.window_size(), settings.draw_area, settings.frame_rate)?;

        window.on_callback(EventKind::Quit, Action::Quit);
        window.on_callback(EventKind::Key(settings.keys.quit), Action::Quit);

        let robot = RobotController::new(&mut window, settings, mode);
        let goal = GoalController::new(&mut window, settings, mode);

        log::info!("Commander ready in {mode} mode");
        Ok(Self {
            mode,
            window,
            controllers: Controllers {
                subs: vec![Box::new(robot), Box::new(goal)],
                world_path: None,
            },
        })
    }

    /// Save the world document to `path` when the application quits
    pub fn with_world_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.controllers.world_path = Some(path.into());
        self
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn window(&self) -> &Window<Action> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window<Action> {
        &mut self.window
    }

    pub fn is_toggled(&self, entity: Entity) -> bool {
        self.controllers
            .index_of(entity)
            .is_some_and(|i| self.controllers.subs[i].is_toggled())
    }

    pub fn toggle(&mut self, entity: Entity, call: bool) {
        self.controllers.toggle(&mut self.window, entity, call);
    }

    /// Assemble `{"robot": {...}, "goal": {...}}`
    pub fn to_document(&self) -> Result<Value> {
        self.controllers.to_document(&self.window)
    }

    /// Hand each controller its record. Every controller's key must exist.
    pub fn from_document(&mut self, document: &Value) -> Result<()> {
        self.controllers.from_document(&mut self.window, document)
    }

    pub fn load_world(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let document = persistence::load(path)?;
        self.from_document(&document)
    }

    /// Mark the window as running for toolkits that own the loop themselves
    pub fn open(&mut self) {
        self.window.open();
    }

    pub fn is_running(&self) -> bool {
        self.window.is_running()
    }

    /// One frame driven from outside (see [`Commander::open`])
    pub fn step(&mut self, events: &[Event], delta: f32) -> Result<()> {
        self.window.step(events, delta, &mut self.controllers)
    }

    pub fn draw(&self) -> DrawList {
        self.window.draw()
    }

    /// Run the blocking main loop on `platform`
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> Result<()> {
        self.window.start(platform, &mut self.controllers)
    }
}
