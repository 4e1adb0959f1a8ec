//! Edge-aware state shared by keys, mouse buttons, and actions.

/// State of a key, mouse button, or action.
///
/// The `Just*` variants last exactly one frame:
/// ```text
/// Released ─press()─> JustPressed ─end_frame()─> Pressed
///     ^                                             │
///     │                                          release()
///     │                                             v
///     └────────────end_frame()───────────── JustReleased
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Went down this frame.
    JustPressed,
    /// Held.
    Pressed,
    /// Went up this frame.
    JustReleased,
    /// Up.
    #[default]
    Released,
}

impl ButtonState {
    /// Returns `true` while held, including the first frame.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns `true` only on the frame the button went down.
    #[inline]
    #[must_use]
    pub const fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns `true` only on the frame the button went up.
    #[inline]
    #[must_use]
    pub const fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }

    /// Apply a raw up/down reading.
    #[inline]
    pub fn set(&mut self, down: bool) {
        match (down, self.is_pressed()) {
            (true, false) => *self = Self::JustPressed,
            (false, true) => *self = Self::JustReleased,
            _ => {}
        }
    }

    /// Mark the button as down.
    #[inline]
    pub fn press(&mut self) {
        self.set(true);
    }

    /// Mark the button as up.
    #[inline]
    pub fn release(&mut self) {
        self.set(false);
    }

    /// Settle one-frame edges.
    #[inline]
    pub fn end_frame(&mut self) {
        *self = match *self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            settled => settled,
        };
    }
}
