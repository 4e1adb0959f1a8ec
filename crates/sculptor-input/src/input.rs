//! Input manager combining keyboard, mouse, and action mapping.

use glam::Vec2;
use tracing::trace;
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::KeyCode;

use crate::action::{Action, ActionMap, InputBinding};
use crate::keyboard::KeyboardState;
use crate::mouse::{CursorMode, MouseButton, MouseState};

/// Input manager combining keyboard, mouse, and action mapping.
///
/// Events arrive either from winit (`process_*_event`) or from a scripted
/// driver (`set_binding`, `add_look`). Once per frame call [`update`] before
/// querying actions and [`end_frame`] after.
///
/// [`update`]: InputManager::update
/// [`end_frame`]: InputManager::end_frame
#[derive(Debug)]
pub struct InputManager {
    keyboard: KeyboardState,
    mouse: MouseState,
    actions: ActionMap,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::with_actions(ActionMap::sculptor_defaults())
    }
}

impl InputManager {
    /// Create an input manager with the default sculptor layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input manager with pre-configured actions.
    #[must_use]
    pub fn with_actions(actions: ActionMap) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            actions,
        }
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Get a mutable reference to the action map for runtime rebinding.
    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    /// Process a window event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_key_event(event);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.mouse.process_button(*button, *state);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.process_scroll(*delta);
                true
            }
            WindowEvent::Focused(false) => {
                trace!("focus lost, releasing held inputs");
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Process a device event (raw mouse motion for mouse look).
    #[allow(clippy::cast_possible_truncation)]
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse
                .add_motion(Vec2::new(delta.0 as f32, delta.1 as f32));
        }
    }

    /// Drive a binding directly, without a window.
    pub fn set_binding(&mut self, binding: InputBinding, down: bool) {
        match binding {
            InputBinding::Key(key) => self.keyboard.set(key, down),
            InputBinding::Mouse(button) => self.mouse.set(button, down),
        }
    }

    /// Feed raw look motion directly, without a window.
    pub fn add_look(&mut self, delta: Vec2) {
        self.mouse.add_motion(delta);
    }

    /// Update action states based on current keyboard/mouse state.
    ///
    /// Call at the start of the frame, before querying actions.
    pub fn update(&mut self) {
        self.actions.update(&self.keyboard, &self.mouse);
    }

    /// Settle button edges and reset per-frame deltas.
    ///
    /// Call at the end of every frame.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
        self.actions.end_frame();
    }

    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    #[must_use]
    pub const fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.is_pressed(button)
    }

    /// Raw look motion this frame.
    #[must_use]
    pub const fn look_delta(&self) -> Vec2 {
        self.mouse.look_delta()
    }

    /// Wheel lines this frame.
    #[must_use]
    pub const fn scroll_delta(&self) -> Vec2 {
        self.mouse.scroll_delta()
    }

    #[must_use]
    pub const fn cursor_mode(&self) -> CursorMode {
        self.mouse.cursor_mode()
    }

    /// Set the cursor mode.
    ///
    /// Only the internal state changes; grabbing the real pointer is the
    /// window owner's job.
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.mouse.set_cursor_mode(mode);
    }

    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.actions.is_pressed(action)
    }

    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.actions.is_just_pressed(action)
    }

    #[must_use]
    pub fn is_action_just_released(&self, action: Action) -> bool {
        self.actions.is_just_released(action)
    }

    /// Release every key and button. Cursor mode is kept.
    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.mouse.clear();
        self.actions.reset_states();
    }
}
