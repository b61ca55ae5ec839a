//! Dead-zone camera: the player walks freely between two screen-space
//! bounds; pushing past either one scrolls the world instead.

use crate::input::state::InputState;

/// What the horizontal controls do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalMove {
    /// The player moves on screen at this x velocity.
    Walk(f32),
    /// The player is pinned and the world scrolls by this many pixels
    /// (positive = towards the level's end).
    Scroll(f32),
    /// Nothing moves.
    Idle,
}

/// Tunables for the dead zone, taken from the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPolicy {
    /// Pixels per frame, for walking and scrolling alike.
    pub speed: f32,
    /// Walking left stops once x reaches this.
    pub left_bound: f32,
    /// Walking right stops once x reaches this.
    pub right_bound: f32,
    /// Background layers move this fraction of the foreground scroll.
    pub parallax_ratio: f32,
    /// At scroll offset 0 the player may keep walking left down to x = 0.
    pub walk_to_edge_at_start: bool,
}

impl ScrollPolicy {
    /// Decide the move for `input` with the player at `player_x`.
    /// Right is checked first when both are held.
    pub fn decide(&self, input: &InputState, player_x: f32, scroll_offset: f32) -> HorizontalMove {
        if input.right && player_x < self.right_bound {
            return HorizontalMove::Walk(self.speed);
        }

        let at_level_start =
            self.walk_to_edge_at_start && scroll_offset <= 0.0 && player_x > 0.0;
        if input.left && (player_x > self.left_bound || at_level_start) {
            return HorizontalMove::Walk(-self.speed);
        }

        if input.right {
            HorizontalMove::Scroll(self.speed)
        } else if input.left && scroll_offset > 0.0 {
            HorizontalMove::Scroll(-self.speed.min(scroll_offset))
        } else {
            HorizontalMove::Idle
        }
    }
}
