//! Graphics layer over the external toolkit
//!
//! Sprites tessellate into a [`DrawList`] each frame; the platform adapter
//! presents it. Rendering itself is left to the toolkit.

pub mod shapes;
pub mod sprite;
pub mod vertex;
pub mod window;

pub use sprite::{Anchor, RobotSprite, Sprite, Text};
pub use vertex::{DrawList, TextRun, Vertex};
pub use window::{Event, EventHandler, EventKind, Key, Window};
