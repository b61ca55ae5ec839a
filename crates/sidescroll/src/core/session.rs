use glam::Vec2;

use crate::api::level::LevelConfig;
use crate::api::types::FrameResult;
use crate::assets::registry::ImageRegistry;
use crate::components::layer::ParallaxLayer;
use crate::core::body::Body;
use crate::core::obstacle::{resolve_landings, Obstacle};
use crate::core::scroll::HorizontalMove;
use crate::core::world::WorldState;
use crate::input::state::InputState;
use crate::renderer::traits::{Color, Drawable, Rect, Surface};

/// Everything that changes during a playthrough.
///
/// A reset swaps in a freshly built `Session`; nothing is patched field by
/// field, so no state from the failed run can leak into the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub player: Body,
    pub platforms: Vec<Obstacle>,
    /// Back to front.
    pub layers: Vec<ParallaxLayer>,
    pub world: WorldState,
    /// Set while the scroll offset is past the win distance.
    win_latched: bool,
}

impl Session {
    /// Lay out a level on a playfield of the given size.
    /// Layers whose image is not in the registry are left out.
    pub fn from_level(level: &LevelConfig, images: &ImageRegistry, playfield: Vec2) -> Self {
        let player = Body::new(level.player_start, level.player_velocity)
            .with_color(level.player_color);

        let platform_image = images.get(&level.platform_image);
        if platform_image.is_none() {
            log::warn!(
                "platform image '{}' not in manifest, drawing flat platforms",
                level.platform_image
            );
        }
        let platforms = level
            .platforms
            .iter()
            .map(|p| Obstacle::new(Vec2::new(p.x, p.y), platform_image))
            .collect();

        let layers = level
            .layers
            .iter()
            .filter_map(|desc| {
                let Some(image) = images.get(&desc.image) else {
                    log::warn!("layer image '{}' not in manifest, skipping layer", desc.image);
                    return None;
                };
                let size = desc.size_in(playfield);
                Some(ParallaxLayer::new(
                    Vec2::new(desc.x, desc.y),
                    image,
                    size.x,
                    size.y,
                ))
            })
            .collect();

        Self {
            player,
            platforms,
            layers,
            world: WorldState::default(),
            win_latched: false,
        }
    }

    /// Advance one frame: integrate the player, resolve the horizontal
    /// controls against the dead zone, land on platforms and check for a win.
    ///
    /// Falling out of the playfield is reported by `fell_out`; rebuilding the
    /// session is the caller's job.
    pub fn step(&mut self, level: &LevelConfig, input: &InputState, floor: f32) -> FrameResult {
        self.player.integrate(level.gravity, floor, level.solid_floor);

        let policy = level.scroll_policy();
        match policy.decide(input, self.player.position.x, self.world.scroll_offset) {
            HorizontalMove::Walk(vx) => self.player.velocity.x = vx,
            HorizontalMove::Scroll(delta) => {
                self.player.velocity.x = 0.0;
                self.scroll(delta, policy.parallax_ratio);
            }
            HorizontalMove::Idle => self.player.velocity.x = 0.0,
        }

        let landed = resolve_landings(&mut self.player, &self.platforms);

        FrameResult {
            won: self.check_win(level.win_distance),
            reset: false,
            landed,
            scroll_offset: self.world.scroll_offset,
        }
    }

    /// Shift platforms and layers opposite to the scroll direction.
    fn scroll(&mut self, delta: f32, parallax_ratio: f32) {
        let applied = self.world.scroll_by(delta, parallax_ratio);
        for platform in &mut self.platforms {
            platform.position.x -= applied;
        }
        let background = applied * parallax_ratio;
        for layer in &mut self.layers {
            layer.shift(-background);
        }
    }

    /// True on the frame the offset first exceeds `win_distance`.
    /// Re-arms once the offset falls back to or below it.
    fn check_win(&mut self, win_distance: f32) -> bool {
        let past = self.world.scroll_offset > win_distance;
        let crossed = past && !self.win_latched;
        self.win_latched = past;
        crossed
    }

    /// Take layer sizes from `template`, a session laid out for a new
    /// playfield. Positions and everything else stay as they are.
    pub fn fit_layers(&mut self, template: &[ParallaxLayer]) {
        for (layer, fresh) in self.layers.iter_mut().zip(template) {
            layer.width = fresh.width;
            layer.height = fresh.height;
        }
    }

    /// The player's top edge is below the bottom of the playfield.
    pub fn fell_out(&self, floor: f32) -> bool {
        self.player.position.y > floor
    }

    /// Paint the frame: clear, fill, layers back to front, platforms, player.
    pub fn render(&self, surface: &mut dyn Surface, clear_color: Color) {
        let full = Rect::from_pos_size(Vec2::ZERO, surface.size());
        surface.clear_rect(full);
        surface.fill_rect(full, clear_color);

        let mut drawables: Vec<&dyn Drawable> =
            Vec::with_capacity(self.layers.len() + self.platforms.len() + 1);
        drawables.extend(self.layers.iter().map(|l| l as &dyn Drawable));
        drawables.extend(self.platforms.iter().map(|p| p as &dyn Drawable));
        drawables.push(&self.player);

        for drawable in drawables {
            drawable.draw(surface, Vec2::ZERO);
        }
    }
}
