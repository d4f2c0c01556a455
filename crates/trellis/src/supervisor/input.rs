//! Per-frame input snapshot.

use trellis_render::Point;

/// The input state sampled by the host once per frame.
///
/// `button1` is the primary button. `button3` (usually the right button)
/// only matters while dragging: a drag ends once both are up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputState {
    /// Cursor position in absolute coordinates.
    pub cursor: Point,
    pub button1: bool,
    pub button3: bool,
}

impl InputState {
    /// Cursor at `cursor` with no buttons held.
    pub fn at(cursor: Point) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Same state with the primary button held.
    pub fn pressed(mut self) -> Self {
        self.button1 = true;
        self
    }

    /// Same state with the primary button released.
    pub fn released(mut self) -> Self {
        self.button1 = false;
        self
    }

    /// Neither drag button is held.
    pub fn is_released(&self) -> bool {
        !self.button1 && !self.button3
    }
}
