//! First-person camera controller with Fly and Walk modes.

use std::f32::consts::FRAC_PI_2;

use bitflags::bitflags;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sculptor_core::constants::{EYE_HEIGHT, GROUNDED_TOLERANCE};
use sculptor_core::{Error, Result};

use crate::gravity::VerticalBody;
use crate::room::Room;

/// Pitch stays this far away from straight up/down.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

bitflags! {
    /// Movement requested for one step.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveIntent: u8 {
        const FORWARD = 0b0000_0001;
        const BACK    = 0b0000_0010;
        const LEFT    = 0b0000_0100;
        const RIGHT   = 0b0000_1000;
        /// Rise while flying, jump while walking.
        const UP      = 0b0001_0000;
        /// Sink while flying.
        const DOWN    = 0b0010_0000;
        const SPRINT  = 0b0100_0000;
    }
}

impl MoveIntent {
    /// -1, 0, or 1 depending on which of two opposing flags are set.
    fn axis(self, positive: Self, negative: Self) -> f32 {
        f32::from(u8::from(self.contains(positive))) - f32::from(u8::from(self.contains(negative)))
    }
}

/// How the camera translates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionMode {
    /// Free 6-DOF translation, no gravity.
    #[default]
    Fly,
    /// Horizontal movement, gravity, and jumping.
    Walk,
}

impl MotionMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Fly => Self::Walk,
            Self::Walk => Self::Fly,
        }
    }
}

/// Tunables for the first-person controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Units per second while flying
    pub fly_speed: f32,
    /// Units per second while walking
    pub walk_speed: f32,
    /// Speed factor while sprint is held
    pub sprint_multiplier: f32,
    /// Upward speed given by a jump
    pub jump_velocity: f32,
    /// Whether gravity pulls the walking camera down
    pub gravity_enabled: bool,
    /// Radians per pixel of mouse motion
    pub look_sensitivity: f32,
    /// Camera height when standing on the floor
    pub eye_height: f32,
    /// Where the camera starts
    pub start_position: Vec3,
    /// Mode the camera starts in
    pub start_mode: MotionMode,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            fly_speed: 10.0,
            walk_speed: 5.0,
            sprint_multiplier: 2.0,
            jump_velocity: 5.0,
            gravity_enabled: true,
            look_sensitivity: 0.002,
            eye_height: EYE_HEIGHT,
            start_position: Vec3::new(0.0, 3.0, 6.0),
            start_mode: MotionMode::Fly,
        }
    }
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("fly_speed", self.fly_speed),
            ("walk_speed", self.walk_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("jump_velocity", self.jump_velocity),
            ("look_sensitivity", self.look_sensitivity),
            ("eye_height", self.eye_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// First-person camera body.
///
/// Orientation is yaw (around +Y, zero looking down -Z) and pitch (positive
/// looks up). Translation only ever uses yaw.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    mode: MotionMode,
    vertical_velocity: f32,
    settings: ControllerSettings,
}

impl FirstPersonController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            position: settings.start_position,
            yaw: 0.0,
            pitch: 0.0,
            mode: settings.start_mode,
            vertical_velocity: 0.0,
            settings,
        }
    }

    #[inline]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub const fn mode(&self) -> MotionMode {
        self.mode
    }

    #[inline]
    pub const fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    #[inline]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Mutable settings, e.g. to toggle gravity at runtime.
    pub fn settings_mut(&mut self) -> &mut ControllerSettings {
        &mut self.settings
    }

    /// Teleport the camera. Vertical speed is dropped.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_velocity = 0.0;
    }

    /// Set orientation directly; pitch is clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Switch motion mode, discarding any vertical speed carried over.
    pub fn set_mode(&mut self, mode: MotionMode) {
        if mode != self.mode {
            debug!(from = ?self.mode, to = ?mode, "motion mode changed");
        }
        self.mode = mode;
        self.vertical_velocity = 0.0;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Turn by a raw mouse delta in pixels.
    pub fn look(&mut self, delta: Vec2) {
        let sensitivity = self.settings.look_sensitivity;
        self.set_orientation(
            self.yaw - delta.x * sensitivity,
            self.pitch - delta.y * sensitivity,
        );
    }

    /// Horizontal forward vector derived from yaw.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right vector derived from yaw.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Unit view direction including pitch.
    pub fn view_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// Whether the camera stands on the walk floor.
    pub fn is_grounded(&self) -> bool {
        self.position.y <= self.settings.eye_height + GROUNDED_TOLERANCE
    }

    /// Advance the camera by one step and clamp it into the room.
    pub fn step(&mut self, intent: MoveIntent, dt: f32, gravity: f32, room: &Room) {
        let horizontal = self.forward()
            * intent.axis(MoveIntent::FORWARD, MoveIntent::BACK)
            + self.right() * intent.axis(MoveIntent::RIGHT, MoveIntent::LEFT);
        let sprint = if intent.contains(MoveIntent::SPRINT) {
            self.settings.sprint_multiplier
        } else {
            1.0
        };

        match self.mode {
            MotionMode::Fly => {
                let vertical = Vec3::Y * intent.axis(MoveIntent::UP, MoveIntent::DOWN);
                let direction = (horizontal + vertical).normalize_or_zero();
                self.position += direction * self.settings.fly_speed * sprint * dt;
            }
            MotionMode::Walk => {
                let direction = horizontal.normalize_or_zero();
                self.position += direction * self.settings.walk_speed * sprint * dt;

                if intent.contains(MoveIntent::UP) && self.is_grounded() {
                    self.vertical_velocity = self.settings.jump_velocity;
                }
                let pull = if self.settings.gravity_enabled {
                    gravity
                } else {
                    0.0
                };
                let mut body = VerticalBody::new(self.position.y, self.vertical_velocity);
                body.integrate(dt, pull, self.settings.eye_height);
                self.position.y = body.y;
                self.vertical_velocity = body.vy;
            }
        }

        let clamped = room.clamp_camera(self.position, self.settings.eye_height);
        if clamped.y < self.position.y && self.vertical_velocity > 0.0 {
            // Bumped the ceiling.
            self.vertical_velocity = 0.0;
        }
        self.position = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sculptor_core::constants::GRAVITY;

    const DT: f32 = 1.0 / 60.0;

    fn walker() -> FirstPersonController {
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        controller.set_mode(MotionMode::Walk);
        controller
    }

    #[test]
    fn starts_at_configured_pose() {
        let controller = FirstPersonController::new(ControllerSettings::default());
        assert_eq!(controller.position(), Vec3::new(0.0, 3.0, 6.0));
        assert_eq!(controller.mode(), MotionMode::Fly);
        assert_relative_eq!(controller.forward().z, -1.0);
        assert_relative_eq!(controller.right().x, 1.0);
    }

    #[test]
    fn look_clamps_pitch() {
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        controller.look(Vec2::new(0.0, -10_000.0));
        assert_relative_eq!(controller.pitch(), PITCH_LIMIT);
        controller.look(Vec2::new(0.0, 20_000.0));
        assert_relative_eq!(controller.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn mouse_right_turns_right() {
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        controller.look(Vec2::new(100.0, 0.0));
        assert!(controller.yaw() < 0.0);
        assert!(controller.forward().x > 0.0);
    }

    #[test]
    fn pitch_does_not_affect_translation() {
        let room = Room::default();
        let mut level = FirstPersonController::new(ControllerSettings::default());
        let mut tilted = level.clone();
        tilted.set_orientation(0.0, 1.2);
        level.step(MoveIntent::FORWARD, 0.5, GRAVITY, &room);
        tilted.step(MoveIntent::FORWARD, 0.5, GRAVITY, &room);
        assert_eq!(level.position(), tilted.position());
        assert_relative_eq!(level.position().z, 1.0);
        assert_relative_eq!(level.position().y, 3.0);
    }

    #[test]
    fn fly_diagonal_is_normalized() {
        let room = Room::default();
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        let start = controller.position();
        controller.step(MoveIntent::FORWARD | MoveIntent::RIGHT | MoveIntent::UP, 0.1, GRAVITY, &room);
        assert_relative_eq!((controller.position() - start).length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fly_sprint_doubles_speed() {
        let room = Room::default();
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        controller.step(MoveIntent::UP | MoveIntent::SPRINT, 0.1, GRAVITY, &room);
        assert_relative_eq!(controller.position().y, 5.0);
    }

    #[test]
    fn fly_ignores_gravity() {
        let room = Room::default();
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        for _ in 0..60 {
            controller.step(MoveIntent::empty(), DT, GRAVITY, &room);
        }
        assert_relative_eq!(controller.position().y, 3.0);
    }

    #[test]
    fn walk_falls_to_eye_height() {
        let room = Room::default();
        let mut controller = walker();
        for _ in 0..120 {
            controller.step(MoveIntent::empty(), DT, GRAVITY, &room);
        }
        assert_relative_eq!(controller.position().y, EYE_HEIGHT);
        assert_relative_eq!(controller.vertical_velocity(), 0.0);
        assert!(controller.is_grounded());
    }

    #[test]
    fn walk_jump_only_from_the_ground() {
        let room = Room::default();
        let mut controller = walker();
        controller.set_position(Vec3::new(0.0, EYE_HEIGHT, 0.0));

        controller.step(MoveIntent::UP, DT, GRAVITY, &room);
        assert!(controller.vertical_velocity() > 0.0);
        assert!(controller.position().y > EYE_HEIGHT);

        // Holding jump in mid-air does not re-launch.
        let before = controller.vertical_velocity();
        controller.step(MoveIntent::UP, DT, GRAVITY, &room);
        assert!(controller.vertical_velocity() < before);
    }

    #[test]
    fn walk_ignores_vertical_flags_for_direction() {
        let room = Room::default();
        let mut controller = walker();
        controller.set_position(Vec3::new(0.0, EYE_HEIGHT, 0.0));
        controller.step(MoveIntent::RIGHT | MoveIntent::DOWN, 0.2, GRAVITY, &room);
        assert_relative_eq!(controller.position().x, 1.0);
        assert_relative_eq!(controller.position().y, EYE_HEIGHT);
    }

    #[test]
    fn walk_without_gravity_keeps_height() {
        let room = Room::default();
        let mut controller = walker();
        controller.settings_mut().gravity_enabled = false;
        for _ in 0..30 {
            controller.step(MoveIntent::empty(), DT, GRAVITY, &room);
        }
        assert_relative_eq!(controller.position().y, 3.0);
    }

    #[test]
    fn mode_switch_resets_vertical_velocity() {
        let room = Room::default();
        let mut controller = walker();
        for _ in 0..10 {
            controller.step(MoveIntent::empty(), DT, GRAVITY, &room);
        }
        assert!(controller.vertical_velocity() < 0.0);

        controller.toggle_mode();
        assert_eq!(controller.mode(), MotionMode::Fly);
        assert_relative_eq!(controller.vertical_velocity(), 0.0);

        controller.toggle_mode();
        assert_eq!(controller.mode(), MotionMode::Walk);
        assert_relative_eq!(controller.vertical_velocity(), 0.0);
    }

    #[test]
    fn clamped_against_walls_and_ceiling() {
        let room = Room::default();
        let mut controller = FirstPersonController::new(ControllerSettings::default());
        controller.step(MoveIntent::FORWARD, 10.0, GRAVITY, &room);
        assert_relative_eq!(controller.position().z, -19.7);

        controller.step(MoveIntent::UP, 10.0, GRAVITY, &room);
        assert_relative_eq!(controller.position().y, 11.7);

        controller.step(MoveIntent::DOWN, 10.0, GRAVITY, &room);
        assert_relative_eq!(controller.position().y, EYE_HEIGHT);
    }

    #[test]
    fn ceiling_stops_a_jump() {
        let room = Room {
            height: 2.5,
            ..Room::default()
        };
        let mut controller = walker();
        controller.set_position(Vec3::new(0.0, EYE_HEIGHT, 0.0));
        controller.settings_mut().jump_velocity = 50.0;
        controller.step(MoveIntent::UP, 0.1, GRAVITY, &room);
        assert_relative_eq!(controller.position().y, 2.2);
        assert_relative_eq!(controller.vertical_velocity(), 0.0);
    }

    #[test]
    fn settings_validation() {
        assert!(ControllerSettings::default().validate().is_ok());
        let bad = ControllerSettings {
            walk_speed: -1.0,
            ..ControllerSettings::default()
        };
        assert!(bad.validate().is_err());
    }
}
