//! Mouse buttons, look motion, wheel, and cursor capture.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};

use crate::button_state::ButtonState;

/// Pixels of touchpad scroll counted as one wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            _ => Err(()),
        }
    }
}

/// Whether the pointer is captured for mouse look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Free cursor, mouse motion does not turn the camera.
    #[default]
    Normal,
    /// Cursor is locked and hidden; motion turns the camera.
    Locked,
}

impl CursorMode {
    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Locked,
            Self::Locked => Self::Normal,
        }
    }
}

/// Mouse input state.
#[derive(Debug, Default)]
pub struct MouseState {
    /// Raw device motion accumulated this frame.
    look_delta: Vec2,
    /// Wheel lines accumulated this frame (y = vertical).
    scroll_delta: Vec2,
    buttons: [ButtonState; 3],
    cursor_mode: CursorMode,
}

impl MouseState {
    /// Create a new mouse state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw mouse motion.
    pub fn add_motion(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Process a winit mouse button event.
    pub fn process_button(&mut self, button: WinitMouseButton, state: ElementState) {
        let Ok(button) = MouseButton::try_from(button) else {
            return;
        };
        self.set(button, state == ElementState::Pressed);
    }

    /// Apply a raw up/down reading for `button`.
    pub fn set(&mut self, button: MouseButton, down: bool) {
        self.buttons[button as usize].set(down);
    }

    /// Process scroll wheel event.
    #[allow(clippy::cast_possible_truncation)]
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => self.scroll_delta += Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                self.scroll_delta += Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE;
            }
        }
    }

    /// Raw motion this frame.
    #[must_use]
    pub const fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    /// Wheel lines this frame.
    #[must_use]
    pub const fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    #[must_use]
    pub const fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button as usize].is_pressed()
    }

    #[must_use]
    pub const fn is_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button as usize].is_just_pressed()
    }

    #[must_use]
    pub const fn is_just_released(&self, button: MouseButton) -> bool {
        self.buttons[button as usize].is_just_released()
    }

    #[must_use]
    pub const fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Called at end of frame to transition button states and reset deltas.
    pub fn end_frame(&mut self) {
        for button in &mut self.buttons {
            button.end_frame();
        }
        self.look_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Release all buttons and drop pending motion. Cursor mode is kept.
    pub fn clear(&mut self) {
        self.look_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
        self.buttons = [ButtonState::Released; 3];
    }
}
