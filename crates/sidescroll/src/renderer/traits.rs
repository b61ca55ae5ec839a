//! Drawing contract between the simulation and whatever paints the frame.
//!
//! The core never touches a canvas. Every visible object implements
//! [`Drawable`] and issues its commands against a [`Surface`]; the web crate
//! backs the surface with a `CanvasRenderingContext2d`, tests back it with a
//! [`DrawList`](super::DrawList).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::ImageId;

/// Axis-aligned rectangle in canvas pixels, origin top-left, Y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// The same rectangle moved by `by`.
    pub fn translated(self, by: Vec2) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
            ..self
        }
    }
}

/// Opaque RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string accepted by `fillStyle`.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A fixed-size 2D drawing target.
pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> Vec2;

    /// Erase a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a whole image stretched into `target`.
    /// Images that have not finished loading must be skipped silently.
    fn draw_image(&mut self, image: ImageId, target: Rect);
}

/// Anything that knows how to paint itself onto a [`Surface`].
///
/// `offset` is added to the object's own position; the game loop passes
/// `Vec2::ZERO` because scrolling already moves the objects themselves.
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, offset: Vec2);
}
