//! Voxel kinds and appearance parameters.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a voxel behaves after placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoxelKind {
    /// Stays where it was placed
    #[default]
    Static,
    /// Falls until it rests on the floor or another voxel
    Gravity,
}

impl VoxelKind {
    /// The other kind
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Static => Self::Gravity,
            Self::Gravity => Self::Static,
        }
    }
}

/// Shading model for a voxel's material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shading {
    /// Lambert shading with flat normals
    Flat,
    /// Physically based shading driven by reflectivity
    #[default]
    Standard,
}

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Default cube color
    pub const CUBE: Self = Self::rgb(0x44, 0xaa, 0x88);

    /// Create a color from components
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `[0.0, 1.0]`
    #[inline]
    pub fn to_linear_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidConfig(format!("invalid color '{s}'")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| Error::InvalidConfig(format!("invalid color '{s}'")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Look of a voxel, chosen from the tool settings at placement time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Base color
    pub color: Color,
    /// 0.0 = opaque, 1.0 = invisible
    pub transparency: f32,
    /// Shading model
    pub shading: Shading,
    /// 0.0 = rough dielectric, 1.0 = polished metal (standard shading only)
    pub reflectivity: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: Color::CUBE,
            transparency: 0.0,
            shading: Shading::Standard,
            reflectivity: 0.0,
        }
    }
}

impl Appearance {
    /// Check that the scalar parameters lie in `[0.0, 1.0]`.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("transparency", self.transparency),
            ("reflectivity", self.reflectivity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the material a renderer should use.
    pub fn material(&self) -> Material {
        let opacity = 1.0 - self.transparency;
        let (roughness, metalness) = match self.shading {
            Shading::Flat => (1.0, 0.0),
            Shading::Standard => (1.0 - self.reflectivity, self.reflectivity),
        };
        Material {
            color: self.color,
            opacity,
            transparent: opacity < 1.0,
            shading: self.shading,
            roughness,
            metalness,
        }
    }
}

/// Material properties for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color
    pub color: Color,
    /// Opacity (1.0 = opaque)
    pub opacity: f32,
    /// Whether blending is required
    pub transparent: bool,
    /// Shading model
    pub shading: Shading,
    /// Roughness (0.0 = mirror, 1.0 = diffuse)
    pub roughness: f32,
    /// Metalness (0.0 = dielectric, 1.0 = metal)
    pub metalness: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_hex_color() {
        let color: Color = "#ff8000".parse().unwrap();
        assert_eq!(color, Color::rgb(255, 128, 0));
        let color: Color = "44AA88".parse().unwrap();
        assert_eq!(color, Color::CUBE);
        assert_eq!(color.to_string(), "#44aa88");
    }

    #[test]
    fn reject_bad_hex_color() {
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("#ff00ü".parse::<Color>().is_err());
    }

    #[test]
    fn kind_toggles() {
        assert_eq!(VoxelKind::Static.toggled(), VoxelKind::Gravity);
        assert_eq!(VoxelKind::Gravity.toggled(), VoxelKind::Static);
    }

    #[test]
    fn standard_material_from_reflectivity() {
        let appearance = Appearance {
            transparency: 0.25,
            reflectivity: 0.7,
            ..Appearance::default()
        };
        let material = appearance.material();
        assert_relative_eq!(material.opacity, 0.75);
        assert!(material.transparent);
        assert_relative_eq!(material.roughness, 0.3, epsilon = 1e-6);
        assert_relative_eq!(material.metalness, 0.7);
    }

    #[test]
    fn flat_material_ignores_reflectivity() {
        let appearance = Appearance {
            shading: Shading::Flat,
            reflectivity: 0.9,
            ..Appearance::default()
        };
        let material = appearance.material();
        assert!(!material.transparent);
        assert_relative_eq!(material.metalness, 0.0);
    }

    #[test]
    fn appearance_validation() {
        assert!(Appearance::default().validate().is_ok());
        let bad = Appearance {
            transparency: 1.5,
            ..Appearance::default()
        };
        assert!(bad.validate().is_err());
    }
}
