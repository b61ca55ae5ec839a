/// Horizontal progress through the level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorldState {
    /// Cumulative foreground scroll in pixels. Never negative.
    pub scroll_offset: f32,
    /// Cumulative background scroll, `parallax_ratio` times the foreground.
    pub background_offset: f32,
}

impl WorldState {
    /// Scroll by `delta` (positive = towards the level's end) and return the
    /// amount actually applied. Backwards scrolling stops at the start.
    pub fn scroll_by(&mut self, delta: f32, parallax_ratio: f32) -> f32 {
        let applied = delta.max(-self.scroll_offset);
        self.scroll_offset += applied;
        self.background_offset = (self.background_offset + applied * parallax_ratio).max(0.0);
        applied
    }
}
