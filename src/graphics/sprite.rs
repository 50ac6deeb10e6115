//! Sprites: visual entities drawn each frame at a position/orientation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes;
use super::vertex::{DrawList, TextRun, colors};

/// Circle tessellation for markers
const MARKER_SEGMENTS: u32 = 32;

/// Which point of a text box `position` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    TopLeft,
    Center,
}

/// Robot marker: a filled disc with a bar pointing along its heading
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSprite {
    position: Vec2,
    /// Heading in degrees
    direction: f32,
    size: f32,
    color: [f32; 4],
}

impl RobotSprite {
    pub fn new(position: Vec2, size: f32, color: [f32; 4]) -> Self {
        Self {
            position,
            direction: 0.0,
            size,
            color,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = direction;
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn draw(&self, list: &mut DrawList) {
        let radius = self.size / 2.0;
        list.extend(shapes::circle(
            self.position,
            radius,
            self.color,
            MARKER_SEGMENTS,
        ));

        let nose = self.position + Vec2::from_angle(self.direction.to_radians()) * radius;
        list.extend(shapes::quad_line(
            self.position,
            nose,
            (self.size / 10.0).max(2.0),
            colors::ROBOT_HEADING,
        ));
    }
}

/// A text label
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    position: Vec2,
    anchor: Anchor,
    size: f32,
    color: [f32; 4],
}

impl Text {
    pub fn new(text: impl Into<String>, position: Vec2, size: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            position,
            anchor: Anchor::TopLeft,
            size,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn set_position(&mut self, position: Vec2, anchor: Anchor) {
        self.position = position;
        self.anchor = anchor;
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    fn draw(&self, list: &mut DrawList) {
        list.push_text(TextRun {
            text: self.text.clone(),
            position: self.position,
            anchor: self.anchor,
            size: self.size,
            color: self.color,
        });
    }
}

/// Anything the window can draw
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Robot(RobotSprite),
    Text(Text),
}

impl Sprite {
    pub fn position(&self) -> Vec2 {
        match self {
            Sprite::Robot(s) => s.position(),
            Sprite::Text(s) => s.position(),
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        match self {
            Sprite::Robot(s) => s.draw(list),
            Sprite::Text(s) => s.draw(list),
        }
    }

    pub fn as_robot_mut(&mut self) -> Option<&mut RobotSprite> {
        match self {
            Sprite::Robot(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Sprite::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<RobotSprite> for Sprite {
    fn from(sprite: RobotSprite) -> Self {
        Sprite::Robot(sprite)
    }
}

impl From<Text> for Sprite {
    fn from(sprite: Text) -> Self {
        Sprite::Text(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_heading_bar_points_along_direction() {
        let mut robot = RobotSprite::new(Vec2::new(100.0, 100.0), 50.0, [1.0; 4]);
        robot.set_direction(90.0);

        let mut list = DrawList::new();
        Sprite::from(robot).draw(&mut list);

        // Disc first, then the heading quad
        let heading = &list.vertices[(MARKER_SEGMENTS * 3) as usize..];
        assert_eq!(heading.len(), 6);
        let far_y = heading
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((far_y - 125.0).abs() < 1e-3);
    }

    #[test]
    fn test_text_emits_run_not_vertices() {
        let text = Text::new("'R' Place the robot", Vec2::new(20.0, 590.0), 30.0, [1.0; 4]);
        let mut list = DrawList::new();
        Sprite::from(text).draw(&mut list);
        assert!(list.vertices.is_empty());
        assert_eq!(list.texts.len(), 1);
        assert_eq!(list.texts[0].text, "'R' Place the robot");
    }

    #[test]
    fn test_typed_access() {
        let mut sprite = Sprite::from(Text::new("label", Vec2::ZERO, 10.0, [1.0; 4]));
        assert!(sprite.as_robot_mut().is_none());
        if let Some(text) = sprite.as_text_mut() {
            text.set_position(Vec2::new(3.0, 4.0), Anchor::Center);
        }
        assert_eq!(sprite.position(), Vec2::new(3.0, 4.0));
    }
}
