//! Session configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use sculptor_core::constants::GRAVITY;
use sculptor_core::{Error, Result};
use sculptor_physics::{ControllerSettings, Room};
use sculptor_world::SculptureSettings;

use crate::tools::ToolSettings;

/// Everything that shapes a sculpting session.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptorConfig {
    pub room: Room,
    pub controller: ControllerSettings,
    pub sculpture: SculptureSettings,
    pub tools: ToolSettings,
    /// Downward acceleration for falling voxels and the walking camera
    pub gravity: f32,
    /// Longest distance the pick ray reaches
    pub reach: f32,
    /// Upper bound on a single frame's delta time, in seconds
    pub max_frame_dt: f32,
    /// Viewport size used for the camera's aspect ratio
    pub viewport: [u32; 2],
}

impl Default for SculptorConfig {
    fn default() -> Self {
        Self {
            room: Room::default(),
            controller: ControllerSettings::default(),
            sculpture: SculptureSettings::default(),
            tools: ToolSettings::default(),
            gravity: GRAVITY,
            reach: 100.0,
            max_frame_dt: 0.1,
            viewport: [1280, 720],
        }
    }
}

impl SculptorConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Reject values the session cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.controller.validate()?;
        self.room.validate(self.controller.eye_height)?;
        self.tools.validate()?;

        for (name, value) in [
            ("gravity", self.gravity),
            ("reach", self.reach),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.max_frame_dt == 0.0 {
            return Err(Error::InvalidConfig("max_frame_dt must be positive".into()));
        }

        let start = self.controller.start_position;
        let bounds = self.room.camera_bounds(0.0);
        if !bounds.contains_point(start) {
            return Err(Error::OutOfBounds(format!(
                "camera start {start} lies outside the room"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn defaults_are_valid() {
        assert!(SculptorConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SculptorConfig::from_json(
            r##"{ "gravity": 4.0, "room": { "half_extent": 8.0 }, "tools": { "appearance": { "color": "#ff0000" } } }"##,
        )
        .unwrap();
        assert_eq!(config.gravity, 4.0);
        assert_eq!(config.room.half_extent, 8.0);
        assert_eq!(config.room.height, 12.0);
        assert_eq!(config.reach, 100.0);
        assert_eq!(config.tools.appearance.color.r, 255);
    }

    #[test]
    fn rejects_negative_values() {
        let err = SculptorConfig::from_json(r#"{ "reach": -1.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_start_outside_room() {
        let mut config = SculptorConfig::default();
        config.controller.start_position = Vec3::new(0.0, 3.0, 50.0);
        assert!(matches!(config.validate(), Err(Error::OutOfBounds(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SculptorConfig::from_json("{ nope"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn json_survives_a_save() {
        let config = SculptorConfig::default();
        let text = config.to_json().unwrap();
        assert_eq!(SculptorConfig::from_json(&text).unwrap(), config);
    }
}
