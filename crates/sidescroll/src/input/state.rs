/// The four keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Down,
    Right,
    Up,
}

impl Control {
    pub const KEY_A: u32 = 65;
    pub const KEY_S: u32 = 83;
    pub const KEY_D: u32 = 68;
    pub const KEY_W: u32 = 87;

    /// Map a DOM `keyCode`. Anything outside WASD is ignored.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            Self::KEY_A => Some(Self::Left),
            Self::KEY_S => Some(Self::Down),
            Self::KEY_D => Some(Self::Right),
            Self::KEY_W => Some(Self::Up),
            _ => None,
        }
    }
}

/// Held horizontal controls. Last write wins; nothing is queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Record a press or release. Returns false for controls that carry no
    /// held state (up and down).
    pub fn set(&mut self, control: Control, pressed: bool) -> bool {
        match control {
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Up | Control::Down => return false,
        }
        true
    }
}
