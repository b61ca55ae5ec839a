use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::game::GameConfig;
use crate::core::scroll::ScrollPolicy;
use crate::renderer::traits::Color;

/// Everything that shapes one playthrough: physics constants, the dead zone,
/// the win distance and the initial layout.
///
/// Missing JSON fields fall back to the classic preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Added to vertical velocity every frame while airborne (px/frame²).
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_impulse: f32,
    /// Releasing jump zeroes vertical velocity, even on the way down.
    pub cut_jump_on_release: bool,
    /// The bottom edge of the playfield stops the player. When false the
    /// player falls through and the level resets.
    pub solid_floor: bool,

    pub player_start: Vec2,
    pub player_velocity: Vec2,
    pub player_color: Color,

    /// Walk and scroll speed (px/frame).
    pub player_speed: f32,
    pub left_bound: f32,
    pub right_bound: f32,
    pub walk_to_edge_at_start: bool,
    /// Background scroll as a fraction of foreground scroll.
    pub parallax_ratio: f32,

    /// Scroll offset beyond which the level counts as won.
    pub win_distance: f32,

    /// Manifest name of the platform texture.
    pub platform_image: String,
    pub platforms: Vec<PlatformDesc>,
    /// Back to front.
    pub layers: Vec<LayerDesc>,
    /// Painted over the whole surface before anything else.
    pub clear_color: Color,
}

/// Initial top-left corner of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    pub x: f32,
    pub y: f32,
}

/// Initial placement of a parallax layer. Size defaults to the playfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDesc {
    pub image: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl LayerDesc {
    pub fn full_screen(image: &str, x: f32, y: f32) -> Self {
        Self {
            image: image.to_string(),
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// Width and height, falling back to `playfield` for unset values.
    pub fn size_in(&self, playfield: Vec2) -> Vec2 {
        Vec2::new(
            self.width.unwrap_or(playfield.x),
            self.height.unwrap_or(playfield.y),
        )
    }
}

fn platforms_at(y: f32, xs: &[f32]) -> Vec<PlatformDesc> {
    xs.iter().map(|&x| PlatformDesc { x, y }).collect()
}

impl LevelConfig {
    /// Two ground platforms, a fixed background, a solid floor and a win
    /// after 2000 px of scrolling.
    pub fn classic() -> Self {
        Self {
            gravity: 0.5,
            jump_impulse: -10.0,
            cut_jump_on_release: true,
            solid_floor: true,
            player_start: Vec2::new(100.0, 100.0),
            player_velocity: Vec2::new(0.0, 1.0),
            player_color: Color::RED,
            player_speed: 5.0,
            left_bound: 100.0,
            right_bound: 400.0,
            walk_to_edge_at_start: false,
            parallax_ratio: 0.0,
            win_distance: 2000.0,
            platform_image: "platform".to_string(),
            platforms: platforms_at(557.0, &[-1.0, 198.0]),
            layers: vec![LayerDesc::full_screen("background", 0.0, 0.0)],
            clear_color: Color::WHITE,
        }
    }

    /// A longer run of platforms with pits between them, background and hills
    /// scrolling at 0.66x, an open floor and a win after 4600 px.
    pub fn parallax() -> Self {
        let mut platforms = platforms_at(
            470.0,
            &[
                -1.0, 198.0, 497.0, 796.0, 1195.0, 1394.0, 1793.0, 2092.0, 2491.0, 2690.0,
                3089.0, 3388.0, 3787.0, 3986.0, 4385.0, 4684.0, 5083.0, 5282.0,
            ],
        );
        platforms.extend(platforms_at(390.0, &[2890.0, 4185.0]));

        Self {
            player_speed: 10.0,
            walk_to_edge_at_start: true,
            parallax_ratio: 0.66,
            solid_floor: false,
            win_distance: 4600.0,
            platforms,
            layers: vec![
                LayerDesc::full_screen("background", -1.0, -1.0),
                LayerDesc::full_screen("hills", -1.0, -1.0),
            ],
            ..Self::classic()
        }
    }

    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn scroll_policy(&self) -> ScrollPolicy {
        ScrollPolicy {
            speed: self.player_speed,
            left_bound: self.left_bound,
            right_bound: self.right_bound,
            parallax_ratio: self.parallax_ratio,
            walk_to_edge_at_start: self.walk_to_edge_at_start,
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Built-in game setups, one per demo version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Fixed 1024x576 canvas, single background.
    #[default]
    Classic,
    /// Full-window canvas with parallax layers.
    Parallax,
}

impl Preset {
    /// Accepts "classic" and "parallax", case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "parallax" => Some(Self::Parallax),
            _ => None,
        }
    }

    pub fn game_config(self) -> GameConfig {
        match self {
            Preset::Classic => GameConfig::default(),
            Preset::Parallax => GameConfig {
                fit_viewport: true,
                ..GameConfig::default()
            },
        }
    }

    pub fn level(self) -> LevelConfig {
        match self {
            Preset::Classic => LevelConfig::classic(),
            Preset::Parallax => LevelConfig::parallax(),
        }
    }
}
