pub mod canvas;
pub mod runner;

pub use canvas::CanvasSurface;
pub use runner::GameRunner;

use std::cell::RefCell;

use sidescroll::{InputEvent, Platformer, Preset};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<CanvasSurface>>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls made before `game_init` are
/// dropped with a warning and yield `None`.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner<CanvasSurface>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("game not initialized, call game_init() first");
                None
            }
        }
    })
}

fn viewport_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}

/// Start a preset (`"classic"` or `"parallax"`) drawing into the canvas
/// matched by `canvas_selector`. Calling it again replaces the running game.
#[wasm_bindgen]
pub fn game_init(preset: &str, canvas_selector: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let preset = Preset::from_name(preset).unwrap_or_else(|| {
        log::warn!("unknown preset '{}', using classic", preset);
        Preset::Classic
    });

    let mut game = Platformer::from_preset(preset);
    if game.config().fit_viewport {
        match viewport_size() {
            Some((width, height)) => game.resize(width, height),
            None => log::warn!("window size unavailable, keeping default playfield"),
        }
    }

    let mut runner = GameRunner::new(game);
    match CanvasSurface::from_document(canvas_selector) {
        Ok(mut surface) => {
            surface.set_size(runner.world_width(), runner.world_height());
            surface.load_images(runner.game().images());
            runner.attach_surface(surface);
        }
        Err(err) => log::warn!("running without a canvas: {:?}", err),
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("sidescroll: {:?} initialized", preset);
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn game_load_level(json: &str) -> bool {
    with_runner(|r| r.load_level(json)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn game_load_manifest(json: &str) -> bool {
    with_runner(|r| {
        let loaded = r.load_manifest(json);
        if loaded {
            r.with_surface_images(|surface, images| surface.load_images(images));
        }
        loaded
    })
    .unwrap_or(false)
}

/// Resize the playfield and canvas, e.g. from a window `resize` listener.
/// The current run keeps its progress.
#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| {
        r.game_mut().resize(width, height);
        if let Some(surface) = r.surface_mut() {
            surface.set_size(width, height);
        }
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_scroll_offset() -> f32 {
    with_runner(|r| r.scroll_offset()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}
