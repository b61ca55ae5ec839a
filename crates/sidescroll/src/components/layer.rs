use glam::Vec2;

use crate::api::types::ImageId;
use crate::renderer::traits::{Drawable, Rect, Surface};

/// A background image scrolled at a fraction of the foreground speed.
///
/// Drawn twice, side by side, from the tile origin nearest the left edge so
/// the strip never shows a gap however far the world has scrolled.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    /// Unwrapped position; grows more negative as the world scrolls right.
    pub position: Vec2,
    pub image: ImageId,
    pub width: f32,
    pub height: f32,
}

impl ParallaxLayer {
    pub fn new(position: Vec2, image: ImageId, width: f32, height: f32) -> Self {
        Self {
            position,
            image,
            width,
            height,
        }
    }

    /// Move horizontally by `dx` pixels.
    pub fn shift(&mut self, dx: f32) {
        self.position.x += dx;
    }

    /// X of the first tile: `position.x` wrapped into `(-width, 0]`.
    pub fn tile_origin(&self) -> f32 {
        let wrapped = self.position.x.rem_euclid(self.width);
        if wrapped > 0.0 {
            wrapped - self.width
        } else {
            wrapped
        }
    }
}

impl Drawable for ParallaxLayer {
    fn draw(&self, surface: &mut dyn Surface, offset: Vec2) {
        if self.width <= 0.0 {
            return;
        }
        let size = Vec2::new(self.width, self.height);
        let first = Vec2::new(self.tile_origin(), self.position.y) + offset;
        surface.draw_image(self.image, Rect::from_pos_size(first, size));
        surface.draw_image(
            self.image,
            Rect::from_pos_size(first + Vec2::new(self.width, 0.0), size),
        );
    }
}
