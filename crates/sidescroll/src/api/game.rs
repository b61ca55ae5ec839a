use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::level::{LevelConfig, Preset};
use crate::api::types::FrameResult;
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::ImageRegistry;
use crate::core::session::Session;
use crate::input::queue::InputEvent;
use crate::input::state::{Control, InputState};
use crate::renderer::traits::Surface;

/// Configuration for the runner and playfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of one simulated frame in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most frames simulated for a single host callback (default: 10).
    pub max_frames_per_tick: u32,
    /// Playfield width in pixels.
    pub world_width: f32,
    /// Playfield height in pixels. Also the floor and the fall-out line.
    pub world_height: f32,
    /// Size the playfield to the browser window at startup instead of
    /// `world_width` x `world_height`.
    pub fit_viewport: bool,
    /// Maximum number of game events kept per callback (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frames_per_tick: 10,
            world_width: 1024.0,
            world_height: 576.0,
            fit_viewport: false,
            max_events: 32,
        }
    }
}

impl GameConfig {
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

/// The platformer: one level, one live session, the held controls.
///
/// `tick` is pure game logic and `render` only reads, so a host can drive
/// the two at different rates or render into a headless `DrawList`.
pub struct Platformer {
    config: GameConfig,
    level: LevelConfig,
    images: ImageRegistry,
    /// Pristine layout that every reset copies from.
    initial: Session,
    session: Session,
    input: InputState,
    frame: u64,
}

impl Platformer {
    pub fn new(config: GameConfig, level: LevelConfig, manifest: &AssetManifest) -> Self {
        let images = ImageRegistry::from_manifest(manifest);
        let initial = Session::from_level(&level, &images, config.playfield());
        Self {
            session: initial.clone(),
            initial,
            config,
            level,
            images,
            input: InputState::default(),
            frame: 0,
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self::new(preset.game_config(), preset.level(), &AssetManifest::default())
    }

    /// Apply one key notification. Left/right update the held flags; up
    /// jumps on press and, if the level says so, kills vertical velocity on
    /// release. Down and unknown keys do nothing.
    pub fn handle_input(&mut self, event: InputEvent) {
        let (key_code, pressed) = match event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
        };
        let Some(control) = Control::from_key_code(key_code) else {
            return;
        };
        log::debug!("{:?} {}", control, if pressed { "down" } else { "up" });

        match control {
            Control::Left | Control::Right => {
                self.input.set(control, pressed);
            }
            Control::Up if pressed => self.session.player.jump(self.level.jump_impulse),
            Control::Up => {
                if self.level.cut_jump_on_release {
                    self.session.player.release_jump();
                }
            }
            Control::Down => {}
        }
    }

    /// Simulate one frame after applying `events` in order.
    pub fn tick(&mut self, events: &[InputEvent]) -> FrameResult {
        for event in events {
            self.handle_input(*event);
        }
        self.frame += 1;

        let floor = self.config.world_height;
        let mut result = self.session.step(&self.level, &self.input, floor);

        if result.won {
            log::info!("You win (scroll offset {})", result.scroll_offset);
        }

        if self.session.fell_out(floor) {
            log::info!(
                "fell out at x={} after scrolling {}, resetting",
                self.session.player.position.x,
                self.session.world.scroll_offset
            );
            self.reset();
            result.reset = true;
            result.scroll_offset = self.session.world.scroll_offset;
        }

        result
    }

    /// Draw the current session onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.session.render(surface, self.level.clear_color);
    }

    /// Throw away the live session and start over from the level layout.
    /// Held controls survive; they belong to the keyboard, not the run.
    pub fn reset(&mut self) {
        self.session = self.initial.clone();
    }

    /// Switch to a new level and start it from the beginning.
    pub fn set_level(&mut self, level: LevelConfig) {
        self.level = level;
        self.rebuild();
    }

    /// Swap the image manifest. Resets, since image ids may have moved.
    pub fn set_manifest(&mut self, manifest: &AssetManifest) {
        self.images = ImageRegistry::from_manifest(manifest);
        self.rebuild();
    }

    /// Change the playfield size (full-window mode). The run carries on:
    /// only the size-dependent layout is redone, for the live session and for
    /// future resets. A smaller playfield can still drop the player out of it,
    /// which the next `tick` reports as a normal reset.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.world_width = width;
        self.config.world_height = height;
        self.initial = Session::from_level(&self.level, &self.images, self.config.playfield());
        self.session.fit_layers(&self.initial.layers);
        log::info!("playfield resized to {}x{}", width, height);
    }

    fn rebuild(&mut self) {
        self.initial = Session::from_level(&self.level, &self.images, self.config.playfield());
        self.reset();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access for hosts and tests that stage a specific situation.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Frames simulated since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::DrawList;

    const A: u32 = Control::KEY_A;
    const D: u32 = Control::KEY_D;
    const W: u32 = Control::KEY_W;

    fn down(key_code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code }
    }

    fn up(key_code: u32) -> InputEvent {
        InputEvent::KeyUp { key_code }
    }

    #[test]
    fn held_right_walks_then_scrolls() {
        let mut game = Platformer::from_preset(Preset::Classic);
        game.tick(&[down(D)]);
        for _ in 0..60 {
            game.tick(&[]);
        }
        assert_eq!(game.session().player.position.x, 400.0);
        game.tick(&[]);
        assert_eq!(game.session().player.position.x, 400.0);
        assert_eq!(game.session().world.scroll_offset, 10.0);

        game.tick(&[up(D)]);
        assert_eq!(game.session().world.scroll_offset, 10.0);
        assert!(!game.input().right);
    }

    #[test]
    fn held_left_at_start_goes_nowhere() {
        let mut game = Platformer::from_preset(Preset::Classic);
        game.tick(&[down(A)]);
        for _ in 0..10 {
            let result = game.tick(&[]);
            assert_eq!(result.scroll_offset, 0.0);
        }
        assert_eq!(game.session().player.position.x, 100.0);
        assert!(game.input().left);
    }

    #[test]
    fn jump_press_and_release() {
        let mut game = Platformer::from_preset(Preset::Classic);
        game.handle_input(down(W));
        assert_eq!(game.session().player.velocity.y, -10.0);
        game.tick(&[]);
        assert_eq!(game.session().player.velocity.y, -9.5);
        game.handle_input(up(W));
        assert_eq!(game.session().player.velocity.y, 0.0);
    }

    #[test]
    fn release_can_be_made_harmless() {
        let level = LevelConfig {
            cut_jump_on_release: false,
            ..LevelConfig::classic()
        };
        let mut game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        game.handle_input(down(W));
        game.handle_input(up(W));
        assert_eq!(game.session().player.velocity.y, -10.0);
    }

    #[test]
    fn unknown_and_down_keys_are_ignored() {
        let mut game = Platformer::from_preset(Preset::Classic);
        let before = game.session().clone();
        game.handle_input(down(32));
        game.handle_input(down(Control::KEY_S));
        game.handle_input(up(Control::KEY_S));
        game.handle_input(up(999));
        assert_eq!(game.session(), &before);
        assert_eq!(game.input(), &InputState::default());
    }

    #[test]
    fn falling_out_resets_to_fresh_session() {
        let mut game = Platformer::from_preset(Preset::Parallax);
        let fresh = game.session().clone();
        game.tick(&[down(D)]);
        game.tick(&[]);

        let s = game.session_mut();
        s.player.position.y = 600.0;
        s.world.scroll_offset = 120.0;
        s.platforms[0].position.x = -500.0;

        let result = game.tick(&[]);
        assert!(result.reset);
        assert_eq!(result.scroll_offset, 0.0);
        assert_eq!(game.session(), &fresh);
        assert_eq!(game.session().player.position, Vec2::new(100.0, 100.0));
        assert_eq!(game.session().player.velocity, Vec2::new(0.0, 1.0));
        assert_eq!(game.session().world.background_offset, 0.0);
        // Keyboard state is not part of the run.
        assert!(game.input().right);
    }

    #[test]
    fn falling_into_a_pit_resets() {
        let level = LevelConfig {
            platforms: vec![],
            ..LevelConfig::parallax()
        };
        let mut game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        let resets = (0..200).filter(|_| game.tick(&[]).reset).count();
        assert!(resets >= 1);
        assert!(game.session().player.position.y <= 576.0);
    }

    #[test]
    fn classic_floor_never_resets() {
        let level = LevelConfig {
            platforms: vec![],
            ..LevelConfig::classic()
        };
        let mut game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        assert!((0..300).all(|_| !game.tick(&[]).reset));
        // Gravity is added after the floor test, so the last step can sink
        // by at most one gravity increment.
        assert!(game.session().player.bottom() <= 576.5);
    }

    #[test]
    fn win_is_reported_once() {
        let level = LevelConfig {
            win_distance: 20.0,
            ..LevelConfig::classic()
        };
        let mut game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        game.session_mut().player.position.x = 400.0;
        game.tick(&[down(D)]);
        let wins = (0..50).filter(|_| game.tick(&[]).won).count();
        assert_eq!(wins, 1);
        assert!(game.session().world.scroll_offset > 20.0);
    }

    #[test]
    fn resize_refits_layers() {
        let mut game = Platformer::from_preset(Preset::Parallax);
        game.resize(1920.0, 1080.0);
        assert_eq!(game.session().layers[0].width, 1920.0);
        assert_eq!(game.session().layers[0].height, 1080.0);
        assert_eq!(game.config().world_height, 1080.0);
    }

    #[test]
    fn resize_keeps_the_run_going() {
        let mut game = Platformer::from_preset(Preset::Parallax);
        game.session_mut().player.position.x = 400.0;
        game.tick(&[down(D)]);
        for _ in 0..20 {
            game.tick(&[]);
        }
        let scrolled = game.session().world.scroll_offset;
        assert_eq!(scrolled, 210.0);
        let player = game.session().player.clone();
        let platform_x = game.session().platforms[0].position.x;

        game.resize(1280.0, 720.0);
        assert_eq!(game.session().world.scroll_offset, scrolled);
        assert_eq!(game.session().player, player);
        assert_eq!(game.session().platforms[0].position.x, platform_x);
        assert_eq!(game.session().layers[1].width, 1280.0);

        let result = game.tick(&[]);
        assert!(!result.reset);
        assert_eq!(result.scroll_offset, scrolled + 10.0);

        // A later fall starts over on the resized layout.
        game.session_mut().player.position.y = 800.0;
        assert!(game.tick(&[]).reset);
        assert_eq!(game.session().world.scroll_offset, 0.0);
        assert_eq!(game.session().layers[0].width, 1280.0);
        assert_eq!(game.session().layers[0].height, 720.0);
    }

    #[test]
    fn set_level_restarts() {
        let mut game = Platformer::from_preset(Preset::Classic);
        game.session_mut().world.scroll_offset = 50.0;
        game.set_level(LevelConfig::parallax());
        assert_eq!(game.session().world.scroll_offset, 0.0);
        assert_eq!(game.session().platforms.len(), LevelConfig::parallax().platforms.len());
    }

    #[test]
    fn render_uses_surface() {
        let game = Platformer::from_preset(Preset::Classic);
        let mut list = DrawList::new(1024.0, 576.0);
        game.render(&mut list);
        assert!(!list.commands().is_empty());
    }

    #[test]
    fn frame_counter_counts_ticks() {
        let mut game = Platformer::from_preset(Preset::Classic);
        for _ in 0..3 {
            game.tick(&[]);
        }
        assert_eq!(game.frame(), 3);
    }
}
