//! Scene lighting.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Ambient fill plus one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingRig {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub sun_color: Vec3,
    pub sun_intensity: f32,
    /// Position the directional light shines from, toward the origin.
    pub sun_position: Vec3,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: 0.5,
            sun_color: Vec3::ONE,
            sun_intensity: 1.0,
            sun_position: Vec3::new(5.0, 10.0, 7.0),
        }
    }
}

impl LightingRig {
    /// Unit vector pointing from the scene toward the light.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_position.try_normalize().unwrap_or(Vec3::Y)
    }

    pub fn uniforms(&self) -> LightingUniforms {
        LightingUniforms {
            ambient: (self.ambient_color * self.ambient_intensity)
                .extend(1.0)
                .to_array(),
            sun_color: (self.sun_color * self.sun_intensity).extend(1.0).to_array(),
            sun_direction: self.sun_direction().extend(0.0).to_array(),
        }
    }
}

/// Lighting uniform buffer data for GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightingUniforms {
    pub ambient: [f32; 4],
    pub sun_color: [f32; 4],
    pub sun_direction: [f32; 4],
}
