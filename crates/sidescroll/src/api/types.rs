use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Handle to an image known to the asset registry.
/// Index into the manifest's image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageId(pub u32);

/// Discriminant written into `GameEvent::kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    /// Scroll offset crossed the level's win distance.
    Won = 1,
    /// The player fell out of the playfield and the session was rebuilt.
    Reset = 2,
}

impl EventKind {
    pub fn from_f32(value: f32) -> Option<Self> {
        match value as u32 {
            1 => Some(Self::Won),
            2 => Some(Self::Reset),
            _ => None,
        }
    }
}

/// A game event handed to the host page through a flat f32 buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
    /// Frame counts at or above this no longer fit exactly in one f32.
    pub const FRAME_SPLIT: u64 = 1 << 24;

    /// `a` = scroll offset at the crossing.
    pub fn won(scroll_offset: f32) -> Self {
        Self {
            kind: EventKind::Won as u32 as f32,
            a: scroll_offset,
            ..Self::default()
        }
    }

    /// Frame number the reset happened on, as `a + b * FRAME_SPLIT`.
    /// Both halves stay whole numbers below 2^24, so counts up to 2^48 are exact.
    pub fn reset(frame: u64) -> Self {
        Self {
            kind: EventKind::Reset as u32 as f32,
            a: (frame % Self::FRAME_SPLIT) as f32,
            b: (frame / Self::FRAME_SPLIT) as f32,
            ..Self::default()
        }
    }

    /// Frame number carried by a reset event.
    pub fn frame(&self) -> u64 {
        self.a as u64 + self.b as u64 * Self::FRAME_SPLIT
    }

    pub fn event_kind(&self) -> Option<EventKind> {
        EventKind::from_f32(self.kind)
    }
}

/// Outcome of a single simulated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameResult {
    /// The win threshold was crossed this frame.
    pub won: bool,
    /// The player fell off the bottom and the session was reset.
    pub reset: bool,
    /// At least one platform stopped the player's fall this frame.
    pub landed: bool,
    /// Scroll offset after the frame (0 when `reset` is set).
    pub scroll_offset: f32,
}
