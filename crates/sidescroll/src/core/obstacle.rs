use glam::Vec2;

use crate::api::types::ImageId;
use crate::core::body::Body;
use crate::renderer::traits::{Color, Drawable, Rect, Surface};

/// A platform. Size is fixed; only the position moves, and only
/// horizontally when the world scrolls.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner in screen space.
    pub position: Vec2,
    /// Texture; platforms without one are filled flat.
    pub image: Option<ImageId>,
}

impl Obstacle {
    pub const WIDTH: f32 = 200.0;
    pub const HEIGHT: f32 = 20.0;
    pub const FALLBACK_COLOR: Color = Color::rgb(0, 0, 255);

    pub fn new(position: Vec2, image: Option<ImageId>) -> Self {
        Self { position, image }
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + Self::WIDTH
    }

    /// Whether `body` is about to land on this platform: its bottom edge is
    /// at or above the top now, at or below it after one more frame, and the
    /// two horizontal extents overlap. Vertical axis only.
    pub fn catches(&self, body: &Body) -> bool {
        body.bottom() <= self.top()
            && body.projected_bottom() >= self.top()
            && body.right() >= self.left()
            && body.left() <= self.right()
    }
}

/// Stop the body's fall on any platform that catches it.
/// Returns true if at least one did. Side contact passes straight through.
pub fn resolve_landings(body: &mut Body, obstacles: &[Obstacle]) -> bool {
    let landed = obstacles.iter().any(|o| o.catches(body));
    if landed {
        body.velocity.y = 0.0;
    }
    landed
}

impl Drawable for Obstacle {
    fn draw(&self, surface: &mut dyn Surface, offset: Vec2) {
        let rect = Rect::from_pos_size(self.position, Vec2::new(Self::WIDTH, Self::HEIGHT))
            .translated(offset);
        match self.image {
            Some(image) => surface.draw_image(image, rect),
            None => surface.fill_rect(rect, Self::FALLBACK_COLOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::{DrawCommand, DrawList};

    fn ground() -> Obstacle {
        Obstacle::new(Vec2::new(-1.0, 557.0), Some(ImageId(0)))
    }

    fn falling_at(x: f32, y: f32, vy: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(0.0, vy))
    }

    #[test]
    fn lands_when_crossing_top_edge() {
        // bottom 555, next 561 >= 557
        let mut body = falling_at(100.0, 525.0, 6.0);
        assert!(resolve_landings(&mut body, &[ground()]));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn resting_exactly_on_top_stays_landed() {
        let mut body = falling_at(100.0, 527.0, 0.5);
        assert!(resolve_landings(&mut body, &[ground()]));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn no_landing_when_still_above() {
        let mut body = falling_at(100.0, 400.0, 3.0);
        assert!(!resolve_landings(&mut body, &[ground()]));
        assert_eq!(body.velocity.y, 3.0);
    }

    #[test]
    fn no_landing_when_already_below_top() {
        let mut body = falling_at(100.0, 540.0, 3.0);
        assert!(!resolve_landings(&mut body, &[ground()]));
        assert_eq!(body.velocity.y, 3.0);
    }

    #[test]
    fn horizontal_overlap_is_inclusive() {
        let platform = ground();
        // right edge touches left edge of platform
        let touching_left = falling_at(-31.0, 525.0, 6.0);
        assert!(platform.catches(&touching_left));
        // left edge touches right edge (199)
        let touching_right = falling_at(199.0, 525.0, 6.0);
        assert!(platform.catches(&touching_right));
        let past_right = falling_at(199.5, 525.0, 6.0);
        assert!(!platform.catches(&past_right));
    }

    #[test]
    fn side_contact_passes_through() {
        // Moving sideways into the platform's body: bottom is below its top.
        let mut body = falling_at(-20.0, 540.0, 0.0);
        body.velocity.x = 5.0;
        assert!(!resolve_landings(&mut body, &[ground()]));
    }

    #[test]
    fn resolution_is_idempotent() {
        let platforms = [ground(), Obstacle::new(Vec2::new(100.0, 557.0), None)];
        let mut once = falling_at(100.0, 525.0, 6.0);
        resolve_landings(&mut once, &platforms);
        let mut twice = once.clone();
        resolve_landings(&mut twice, &platforms);
        assert_eq!(once, twice);
        assert_eq!(twice.velocity.y, 0.0);
    }

    #[test]
    fn order_does_not_matter() {
        let a = ground();
        let b = Obstacle::new(Vec2::new(150.0, 560.0), None);
        let mut forward = falling_at(160.0, 525.0, 6.0);
        let mut backward = forward.clone();
        resolve_landings(&mut forward, &[a.clone(), b.clone()]);
        resolve_landings(&mut backward, &[b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn draws_image_or_fallback() {
        let mut list = DrawList::new(1024.0, 576.0);
        ground().draw(&mut list, Vec2::ZERO);
        Obstacle::new(Vec2::new(300.0, 400.0), None).draw(&mut list, Vec2::new(10.0, 0.0));
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Image(ImageId(0), Rect::new(-1.0, 557.0, 200.0, 20.0)),
                DrawCommand::Fill(Rect::new(310.0, 400.0, 200.0, 20.0), Obstacle::FALLBACK_COLOR),
            ]
        );
    }
}
