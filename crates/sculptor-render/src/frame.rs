//! Everything a renderer needs to draw one frame.

use glam::Vec3;

use sculptor_physics::Room;
use sculptor_world::VoxelView;

use crate::camera::{Camera, CameraUniforms};
use crate::instance::VoxelInstance;
use crate::lighting::{LightingRig, LightingUniforms};

/// What the center ray is pointing at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    /// Point on the struck face
    pub point: Vec3,
    /// Outward normal of the struck face
    pub normal: Vec3,
    /// Center and edge length of the cell a place would fill, when placing is
    /// possible there.
    pub preview: Option<(Vec3, f32)>,
    /// Whether the target is a voxel (and so removable)
    pub on_voxel: bool,
}

/// A fully prepared frame.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub camera: CameraUniforms,
    pub lighting: LightingUniforms,
    /// Interior extent of the room: floor, walls, and ceiling.
    pub room_min: Vec3,
    pub room_max: Vec3,
    /// Opaque voxels first, then transparent ones.
    pub instances: Vec<VoxelInstance>,
    pub highlight: Option<Highlight>,
}

impl RenderFrame {
    pub fn build<'a>(
        camera: &Camera,
        lighting: &LightingRig,
        room: &Room,
        voxels: impl IntoIterator<Item = &'a VoxelView>,
        highlight: Option<Highlight>,
    ) -> Self {
        let mut instances: Vec<VoxelInstance> =
            voxels.into_iter().map(VoxelInstance::from).collect();
        // Stable so opaque draw order follows placement order.
        instances.sort_by_key(|instance| instance.has_flag(crate::instance::FLAG_TRANSPARENT));

        let bounds = room.bounds();
        Self {
            camera: camera.uniforms(),
            lighting: lighting.uniforms(),
            room_min: bounds.min,
            room_max: bounds.max,
            instances,
            highlight,
        }
    }

    /// Number of voxels to draw.
    pub fn voxel_count(&self) -> usize {
        self.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculptor_core::{Appearance, GridCell};
    use sculptor_world::{Brush, Sculpture};

    #[test]
    fn transparent_voxels_are_drawn_last() {
        let mut sculpture = Sculpture::default();
        let glass = Brush {
            appearance: Appearance {
                transparency: 0.6,
                ..Appearance::default()
            },
            ..Brush::default()
        };
        sculpture.place_in_cell(GridCell::new(0, 0, 0), &glass).unwrap();
        sculpture
            .place_in_cell(GridCell::new(2, 0, 0), &Brush::default())
            .unwrap();

        let voxels = sculpture.voxels();
        let frame = RenderFrame::build(
            &Camera::default(),
            &LightingRig::default(),
            sculpture.room(),
            &voxels,
            None,
        );
        assert_eq!(frame.voxel_count(), 2);
        assert!(!frame.instances[0].has_flag(crate::instance::FLAG_TRANSPARENT));
        assert!(frame.instances[1].has_flag(crate::instance::FLAG_TRANSPARENT));
        assert_eq!(frame.room_max.y, 12.0);
    }
}
