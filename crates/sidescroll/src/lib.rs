pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::game::{GameConfig, Platformer};
pub use api::level::{LayerDesc, LevelConfig, PlatformDesc, Preset};
pub use api::types::{EventKind, FrameResult, GameEvent, ImageId};
pub use assets::manifest::{AssetManifest, ImageDescriptor};
pub use assets::registry::ImageRegistry;
pub use components::layer::ParallaxLayer;
pub use core::body::Body;
pub use core::obstacle::{resolve_landings, Obstacle};
pub use core::scroll::{HorizontalMove, ScrollPolicy};
pub use core::session::Session;
pub use core::time::FrameClock;
pub use core::world::WorldState;
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::{Control, InputState};
pub use renderer::draw_list::{DrawCommand, DrawList};
pub use renderer::traits::{Color, Drawable, Rect, Surface};
