//! Vertex and draw list types handed to the platform each frame

use glam::Vec2;

use super::sprite::Anchor;

/// Simple 2D vertex with position and color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// A piece of text to be laid out by the toolkit
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub position: Vec2,
    pub anchor: Anchor,
    pub size: f32,
    pub color: [f32; 4],
}

/// Everything drawn in one frame, back to front
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    /// Triangle list (every 3 vertices form a triangle)
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, vertices: Vec<Vertex>) {
        self.vertices.extend(vertices);
    }

    pub fn push_text(&mut self, text: TextRun) {
        self.texts.push(text);
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.texts.is_empty()
    }
}

/// Colors for canvas elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.08, 0.08, 0.1, 1.0];
    pub const ROBOT_HEADING: [f32; 4] = [0.95, 0.95, 1.0, 1.0];
}
