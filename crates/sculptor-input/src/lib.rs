//! Input handling for the voxel sculptor.
//!
//! Keyboard and mouse state with one-frame press/release edges, mapped onto
//! typed sculptor [`Action`]s.
//!
//! # Core Types
//!
//! - [`InputManager`]: Main entry point combining keyboard, mouse, and actions
//! - [`KeyboardState`]: Tracks keyboard key states
//! - [`MouseState`]: Tracks look motion, buttons, wheel, and cursor capture
//! - [`ActionMap`]: Maps actions to input bindings
//!
//! # Usage
//!
//! ```ignore
//! use sculptor_input::{Action, InputManager};
//!
//! let mut input = InputManager::new();
//!
//! // In the window event handler
//! input.process_window_event(&event);
//!
//! // Once per frame
//! input.update();
//! if input.is_action_just_pressed(Action::Place) {
//!     // place a voxel at the crosshair
//! }
//! input.end_frame();
//! ```
//!
//! Mouse look is only meaningful while [`CursorMode::Locked`]; the owner of the
//! window is responsible for actually grabbing the pointer.

mod action;
mod button_state;
mod input;
mod keyboard;
mod mouse;

pub use action::{Action, ActionMap, ActionMapBuilder, InputBinding};
pub use button_state::ButtonState;
pub use input::InputManager;
pub use keyboard::KeyboardState;
pub use mouse::{CursorMode, MouseButton, MouseState};

// Re-export winit types commonly used with input
pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;
