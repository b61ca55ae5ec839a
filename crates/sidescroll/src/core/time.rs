/// Converts host callback deltas into whole simulation frames.
///
/// Physics constants are expressed per frame, so the game advances in
/// discrete frames of `frame_dt` seconds no matter how often the display
/// refreshes.
pub struct FrameClock {
    frame_dt: f32,
    max_frames: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(frame_dt: f32, max_frames: u32) -> Self {
        Self {
            frame_dt,
            max_frames: max_frames.max(1),
            accumulator: 0.0,
        }
    }

    /// Add elapsed seconds. Returns how many frames to simulate now.
    /// A long stall (hidden tab) is capped at `max_frames` and the rest dropped.
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed;
        let frames = (self.accumulator / self.frame_dt) as u32;
        if frames > self.max_frames {
            self.accumulator = 0.0;
            return self.max_frames;
        }
        self.accumulator -= frames as f32 * self.frame_dt;
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_frame_at_display_rate() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn fast_display_skips_alternate_callbacks() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(1.0 / 120.0), 0);
        assert_eq!(clock.accumulate(1.0 / 120.0 + 0.0001), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(2.0), 10);
    }

    #[test]
    fn nonsense_deltas_are_ignored() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.accumulate(f32::NAN), 0);
        assert_eq!(clock.accumulate(f32::INFINITY), 0);
        // Nothing was banked by the rejected deltas.
        assert_eq!(clock.accumulate(1.0 / 120.0), 0);
    }

    #[test]
    fn leftover_carries_into_next_callback() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10);
        // 1.5 frames, then 0.6: the half frame left over completes a second.
        assert_eq!(clock.accumulate(0.025), 1);
        assert_eq!(clock.accumulate(0.01), 1);
    }
}
