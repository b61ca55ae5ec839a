use sidescroll::{
    AssetManifest, FrameClock, FrameResult, GameEvent, ImageRegistry, InputEvent, InputQueue,
    LevelConfig, Platformer, Surface,
};

/// Wires the platformer to the host's animation callback.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps a
/// `thread_local!` `GameRunner<CanvasSurface>` and exports free functions
/// around it. The surface is generic so the runner also works headless.
pub struct GameRunner<S: Surface> {
    game: Platformer,
    clock: FrameClock,
    input: InputQueue,
    surface: Option<S>,
    /// Events from the most recent `tick`, read by the host as flat f32s.
    events: Vec<GameEvent>,
}

impl<S: Surface> GameRunner<S> {
    pub fn new(game: Platformer) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.fixed_dt, config.max_frames_per_tick);
        let events = Vec::with_capacity(config.max_events);
        Self {
            game,
            clock,
            input: InputQueue::new(),
            surface: None,
            events,
        }
    }

    /// Give the runner something to draw on. Without one it simulates only.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host callback: simulate however many frames `dt` seconds
    /// cover, then draw the latest state.
    ///
    /// Queued input is applied on the first simulated frame. If `dt` is too
    /// short for a whole frame the queue is kept for the next callback.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();

        let frames = self.clock.accumulate(dt);
        if frames > 0 {
            let pending = self.input.drain();
            for i in 0..frames {
                let events: &[InputEvent] = if i == 0 { &pending } else { &[] };
                let result = self.game.tick(events);
                self.record(result);
            }
        }

        if let Some(surface) = self.surface.as_mut() {
            self.game.render(surface);
        }
    }

    fn record(&mut self, result: FrameResult) {
        let max = self.game.config().max_events;
        if result.won && self.events.len() < max {
            self.events.push(GameEvent::won(result.scroll_offset));
        }
        if result.reset && self.events.len() < max {
            self.events.push(GameEvent::reset(self.game.frame()));
        }
    }

    /// Replace the level from JSON. On a parse error the current level stays.
    pub fn load_level(&mut self, json: &str) -> bool {
        match LevelConfig::from_json(json) {
            Ok(level) => {
                self.game.set_level(level);
                log::info!("level loaded ({} platforms)", self.game.level().platforms.len());
                true
            }
            Err(err) => {
                log::warn!("ignoring level JSON: {}", err);
                false
            }
        }
    }

    /// Replace the image manifest from JSON. On a parse error the current
    /// manifest stays.
    pub fn load_manifest(&mut self, json: &str) -> bool {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.game.set_manifest(&manifest);
                log::info!("manifest loaded ({} images)", manifest.images.len());
                true
            }
            Err(err) => {
                log::warn!("ignoring manifest JSON: {}", err);
                false
            }
        }
    }

    /// Hand the attached surface and the current image registry to `f`,
    /// e.g. to start loading images after a manifest change.
    pub fn with_surface_images(&mut self, f: impl FnOnce(&mut S, &ImageRegistry)) {
        if let Some(surface) = self.surface.as_mut() {
            f(surface, self.game.images());
        }
    }

    pub fn game(&self) -> &Platformer {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Platformer {
        &mut self.game
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    // ---- Accessors read by the host page ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn scroll_offset(&self) -> f32 {
        self.game.session().world.scroll_offset
    }

    pub fn world_width(&self) -> f32 {
        self.game.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.game.config().world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll::{Control, DrawList, EventKind, GameConfig, Preset};

    const FRAME: f32 = 1.0 / 60.0;

    fn runner(game: Platformer) -> GameRunner<DrawList> {
        let mut runner = GameRunner::new(game);
        runner.attach_surface(DrawList::new(1024.0, 576.0));
        runner
    }

    #[test]
    fn short_callback_keeps_input_queued() {
        let mut r = runner(Platformer::from_preset(Preset::Classic));
        r.push_input(InputEvent::KeyDown { key_code: Control::KEY_D });
        r.tick(FRAME / 4.0);
        assert_eq!(r.pending_input(), 1);
        assert_eq!(r.game().frame(), 0);
        assert!(!r.game().input().right);

        r.tick(FRAME);
        assert_eq!(r.pending_input(), 0);
        assert_eq!(r.game().frame(), 1);
        assert!(r.game().input().right);
    }

    #[test]
    fn jump_is_applied_once_across_catch_up_frames() {
        let mut r = runner(Platformer::from_preset(Preset::Classic));
        r.push_input(InputEvent::KeyDown { key_code: Control::KEY_W });
        r.tick(FRAME * 3.5);
        assert_eq!(r.game().frame(), 3);
        // -10 then three gravity steps
        assert_eq!(r.game().session().player.velocity.y, -8.5);
    }

    #[test]
    fn every_callback_renders() {
        let mut r = runner(Platformer::from_preset(Preset::Classic));
        r.tick(0.0);
        let surface = r.surface().unwrap();
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn fall_reset_becomes_an_event() {
        let level = LevelConfig {
            platforms: vec![],
            ..LevelConfig::parallax()
        };
        let game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        let mut r = runner(game);
        let mut seen = Vec::new();
        for _ in 0..120 {
            r.tick(FRAME);
            seen.extend(r.events().iter().filter_map(|e| e.event_kind()));
        }
        assert!(seen.contains(&EventKind::Reset));
        assert!(!seen.contains(&EventKind::Won));
    }

    #[test]
    fn win_becomes_an_event() {
        let level = LevelConfig {
            win_distance: 10.0,
            ..LevelConfig::classic()
        };
        let game = Platformer::new(GameConfig::default(), level, &AssetManifest::default());
        let mut r = runner(game);
        r.game_mut().session_mut().player.position.x = 400.0;
        r.push_input(InputEvent::KeyDown { key_code: Control::KEY_D });

        let mut wins = Vec::new();
        for _ in 0..10 {
            r.tick(FRAME);
            wins.extend(r.events().iter().copied());
            assert_eq!(r.game_events_len() as usize, r.events().len());
        }
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].event_kind(), Some(EventKind::Won));
        assert_eq!(wins[0].a, 15.0);
    }

    #[test]
    fn bad_level_json_keeps_current_level() {
        let mut r = runner(Platformer::from_preset(Preset::Classic));
        assert!(!r.load_level("{ nope"));
        assert_eq!(r.game().level(), &LevelConfig::classic());

        assert!(r.load_level(r#"{ "win_distance": 50 }"#));
        assert_eq!(r.game().level().win_distance, 50.0);
    }

    #[test]
    fn manifest_reload_reaches_surface() {
        let mut r = runner(Platformer::from_preset(Preset::Classic));
        assert!(r.load_manifest(r#"{ "images": [ { "name": "platform", "path": "p.png" } ] }"#));
        let mut seen = 0;
        r.with_surface_images(|_, images| seen = images.len());
        assert_eq!(seen, 1);
        // Background is gone from the manifest, so the layer is dropped.
        assert!(r.game().session().layers.is_empty());
        assert!(!r.load_manifest("{ \"images\": 3 }"));
        assert_eq!(r.game().images().len(), 1);
    }
}
