use glam::Vec2;

use crate::renderer::traits::{Color, Drawable, Rect, Surface};

/// The player: an axis-aligned box with per-frame velocity.
///
/// Units are canvas pixels and pixels/frame. Horizontal velocity is owned by
/// the scroll policy; only the vertical axis is driven by gravity here.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Body {
    pub const SIZE: f32 = 30.0;

    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            width: Self::SIZE,
            height: Self::SIZE,
            color: Color::RED,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    /// Bottom edge after one more frame at the current vertical velocity.
    pub fn projected_bottom(&self) -> f32 {
        self.bottom() + self.velocity.y
    }

    /// Move by one frame of velocity, then apply gravity while the projected
    /// bottom edge is still inside `floor`.
    ///
    /// Past the floor, `solid_floor` zeroes vertical velocity so the body
    /// rests on the bottom edge; otherwise the velocity is held and the body
    /// keeps falling out of the playfield.
    pub fn integrate(&mut self, gravity: f32, floor: f32, solid_floor: bool) {
        self.position += self.velocity;

        if self.projected_bottom() <= floor {
            self.velocity.y += gravity;
        } else if solid_floor {
            self.velocity.y = 0.0;
        }
    }

    pub fn jump(&mut self, impulse: f32) {
        self.velocity.y = impulse;
    }

    /// Letting go of jump stops vertical motion outright, even mid-air.
    pub fn release_jump(&mut self) {
        self.velocity.y = 0.0;
    }
}

impl Drawable for Body {
    fn draw(&self, surface: &mut dyn Surface, offset: Vec2) {
        let rect = Rect::from_pos_size(self.position, Vec2::new(self.width, self.height));
        surface.fill_rect(rect.translated(offset), self.color);
    }
}
