//! Per-voxel instance data for GPU upload.

use bytemuck::{Pod, Zeroable};

use sculptor_core::{Shading, VoxelKind};
use sculptor_world::VoxelView;

/// Instance flag: shade with flat normals.
pub const FLAG_FLAT: u32 = 1;
/// Instance flag: voxel is affected by gravity.
pub const FLAG_GRAVITY: u32 = 1 << 1;
/// Instance flag: voxel needs blending.
pub const FLAG_TRANSPARENT: u32 = 1 << 2;

/// One cube instance in the voxel instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VoxelInstance {
    /// World-space center
    pub center: [f32; 3],
    /// Edge length
    pub size: f32,
    /// Linear RGB plus opacity in alpha
    pub color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    pub flags: u32,
    pub _pad: u32,
}

impl VoxelInstance {
    #[inline]
    pub const fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

impl From<&VoxelView> for VoxelInstance {
    fn from(voxel: &VoxelView) -> Self {
        let material = voxel.appearance.material();
        let [r, g, b] = material.color.to_linear_unit();

        let mut flags = 0;
        if material.shading == Shading::Flat {
            flags |= FLAG_FLAT;
        }
        if voxel.kind == VoxelKind::Gravity {
            flags |= FLAG_GRAVITY;
        }
        if material.transparent {
            flags |= FLAG_TRANSPARENT;
        }

        Self {
            center: voxel.center.to_array(),
            size: voxel.size.get(),
            color: [r, g, b, material.opacity],
            roughness: material.roughness,
            metalness: material.metalness,
            flags,
            _pad: 0,
        }
    }
}
