use std::collections::HashSet;

use glam::Vec2;

use super::traits::{Color, Rect, Surface};
use crate::api::types::ImageId;

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Fill(Rect, Color),
    Image(ImageId, Rect),
}

/// Headless surface that records what a frame would have drawn.
///
/// By default every image counts as loaded. `with_loaded` narrows that to an
/// explicit set so callers can observe the not-yet-loaded path.
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    loaded: Option<HashSet<ImageId>>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::with_capacity(64),
            loaded: None,
        }
    }

    /// Only the given images are treated as loaded; draws of others are dropped.
    pub fn with_loaded(mut self, images: impl IntoIterator<Item = ImageId>) -> Self {
        self.loaded = Some(images.into_iter().collect());
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Targets of every image draw for `image`, in call order.
    pub fn image_targets(&self, image: ImageId) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image(id, rect) if *id == image => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn is_loaded(&self, image: ImageId) -> bool {
        self.loaded.as_ref().map_or(true, |set| set.contains(&image))
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill(rect, color));
    }

    fn draw_image(&mut self, image: ImageId, target: Rect) {
        if self.is_loaded(image) {
            self.commands.push(DrawCommand::Image(image, target));
        }
    }
}
