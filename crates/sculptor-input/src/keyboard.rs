//! Keyboard input state tracking.

use hashbrown::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::button_state::ButtonState;

/// Keyboard input state, keyed by physical key position.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
}

impl KeyboardState {
    /// Create a new keyboard state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit key event. Keys without a physical code are ignored.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        self.set(key_code, event.state == ElementState::Pressed);
    }

    /// Apply a raw up/down reading for `key`.
    pub fn set(&mut self, key: KeyCode, down: bool) {
        self.keys.entry(key).or_default().set(down);
    }

    /// Returns `true` if the key is currently pressed.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_pressed())
    }

    /// Returns `true` if the key was just pressed this frame.
    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_just_pressed())
    }

    /// Returns `true` if the key was just released this frame.
    #[must_use]
    pub fn is_just_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.is_just_released())
    }

    /// Keys currently held down.
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys
            .iter()
            .filter(|(_, state)| state.is_pressed())
            .map(|(key, _)| *key)
    }

    /// Called at end of frame to transition button states.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.end_frame();
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
