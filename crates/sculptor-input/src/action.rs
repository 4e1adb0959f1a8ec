//! Sculptor actions and their input bindings.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::button_state::ButtonState;
use crate::keyboard::KeyboardState;
use crate::mouse::{MouseButton, MouseState};

/// Everything the user can ask the sculptor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    /// Rise in Fly mode, jump in Walk mode.
    Ascend,
    /// Sink in Fly mode.
    Descend,
    Sprint,
    /// Place a voxel at the target (Add tool).
    Place,
    /// Remove the targeted voxel (Remove tool).
    Remove,
    /// Switch between Fly and Walk.
    ToggleMode,
    /// Switch between the Add and Remove tools.
    ToggleTool,
    /// Switch between Static and Gravity voxels.
    ToggleKind,
    GridGrow,
    GridShrink,
    /// Capture or release the pointer.
    ToggleCursor,
}

/// An input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key.
    Key(KeyCode),
    /// A mouse button.
    Mouse(MouseButton),
}

impl InputBinding {
    fn is_pressed(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(key) => keyboard.is_pressed(key),
            Self::Mouse(button) => mouse.is_pressed(button),
        }
    }

    fn is_just_pressed(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(key) => keyboard.is_just_pressed(key),
            Self::Mouse(button) => mouse.is_just_pressed(button),
        }
    }

    fn is_just_released(self, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match self {
            Self::Key(key) => keyboard.is_just_released(key),
            Self::Mouse(button) => mouse.is_just_released(button),
        }
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

#[derive(Debug, Default)]
struct Binding {
    inputs: Vec<InputBinding>,
    state: ButtonState,
}

/// Maps actions to input bindings, allowing multiple inputs per action.
#[derive(Debug, Default)]
pub struct ActionMap {
    actions: HashMap<Action, Binding>,
}

impl ActionMap {
    /// Create an empty action map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new action map with a builder pattern.
    #[must_use]
    pub fn builder() -> ActionMapBuilder {
        ActionMapBuilder::default()
    }

    /// The sculptor's standard layout.
    #[must_use]
    pub fn sculptor_defaults() -> Self {
        Self::builder()
            .bind_many(Action::MoveForward, [KeyCode::KeyW, KeyCode::ArrowUp])
            .bind_many(Action::MoveBack, [KeyCode::KeyS, KeyCode::ArrowDown])
            .bind_many(Action::MoveLeft, [KeyCode::KeyA, KeyCode::ArrowLeft])
            .bind_many(Action::MoveRight, [KeyCode::KeyD, KeyCode::ArrowRight])
            .bind(Action::Ascend, KeyCode::Space)
            .bind_many(Action::Descend, [KeyCode::ControlLeft, KeyCode::KeyC])
            .bind(Action::Sprint, KeyCode::ShiftLeft)
            .bind(Action::Place, MouseButton::Left)
            .bind(Action::Remove, MouseButton::Right)
            .bind(Action::ToggleMode, KeyCode::KeyF)
            .bind(Action::ToggleTool, KeyCode::KeyR)
            .bind(Action::ToggleKind, KeyCode::KeyG)
            .bind(Action::GridGrow, KeyCode::BracketRight)
            .bind(Action::GridShrink, KeyCode::BracketLeft)
            .bind(Action::ToggleCursor, KeyCode::Escape)
            .build()
    }

    /// Add a binding to an action, creating the action if it doesn't exist.
    pub fn bind(&mut self, action: Action, binding: impl Into<InputBinding>) {
        let binding = binding.into();
        let entry = self.actions.entry(action).or_default();
        if !entry.inputs.contains(&binding) {
            entry.inputs.push(binding);
        }
    }

    /// Remove a binding from an action.
    pub fn unbind(&mut self, action: Action, binding: InputBinding) {
        if let Some(entry) = self.actions.get_mut(&action) {
            entry.inputs.retain(|b| *b != binding);
        }
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn bindings(&self, action: Action) -> &[InputBinding] {
        self.actions
            .get(&action)
            .map(|entry| entry.inputs.as_slice())
            .unwrap_or(&[])
    }

    /// Update action states based on keyboard and mouse state.
    pub fn update(&mut self, keyboard: &KeyboardState, mouse: &MouseState) {
        for entry in self.actions.values_mut() {
            let any_pressed = entry
                .inputs
                .iter()
                .any(|b| b.is_pressed(keyboard, mouse));
            let any_just_pressed = entry
                .inputs
                .iter()
                .any(|b| b.is_just_pressed(keyboard, mouse));
            // Released only once the last held binding lets go.
            let any_just_released = !any_pressed
                && entry
                    .inputs
                    .iter()
                    .any(|b| b.is_just_released(keyboard, mouse));

            // Some binding stayed down since the last frame.
            let any_held_over = entry.inputs.iter().any(|b| {
                b.is_pressed(keyboard, mouse) && !b.is_just_pressed(keyboard, mouse)
            });

            // A release and re-press between two updates is a new press,
            // while a second binding joining a held one is not.
            if any_just_pressed && (!entry.state.is_pressed() || !any_held_over) {
                entry.state = ButtonState::JustPressed;
            } else if any_just_released {
                entry.state = ButtonState::JustReleased;
            } else if any_pressed && !entry.state.is_pressed() {
                entry.state = ButtonState::JustPressed;
            } else if !any_pressed && entry.state.is_pressed() {
                entry.state = ButtonState::JustReleased;
            }
        }
    }

    /// Returns `true` if the action is currently pressed.
    #[must_use]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.state(action).is_pressed()
    }

    /// Returns `true` if the action was just pressed this frame.
    #[must_use]
    pub fn is_just_pressed(&self, action: Action) -> bool {
        self.state(action).is_just_pressed()
    }

    /// Returns `true` if the action was just released this frame.
    #[must_use]
    pub fn is_just_released(&self, action: Action) -> bool {
        self.state(action).is_just_released()
    }

    fn state(&self, action: Action) -> ButtonState {
        self.actions
            .get(&action)
            .map_or(ButtonState::Released, |entry| entry.state)
    }

    /// Called at end of frame to transition action states.
    pub fn end_frame(&mut self) {
        for entry in self.actions.values_mut() {
            entry.state.end_frame();
        }
    }

    /// Drop all action states back to released.
    pub fn reset_states(&mut self) {
        for entry in self.actions.values_mut() {
            entry.state = ButtonState::Released;
        }
    }
}

/// Builder for creating an action map with a fluent API.
#[derive(Debug, Default)]
pub struct ActionMapBuilder {
    actions: ActionMap,
}

impl ActionMapBuilder {
    /// Add a binding to an action.
    #[must_use]
    pub fn bind(mut self, action: Action, binding: impl Into<InputBinding>) -> Self {
        self.actions.bind(action, binding);
        self
    }

    /// Add multiple bindings to an action.
    #[must_use]
    pub fn bind_many(
        mut self,
        action: Action,
        bindings: impl IntoIterator<Item = impl Into<InputBinding>>,
    ) -> Self {
        for binding in bindings {
            self.actions.bind(action, binding);
        }
        self
    }

    /// Build the action map.
    #[must_use]
    pub fn build(self) -> ActionMap {
        self.actions
    }
}
