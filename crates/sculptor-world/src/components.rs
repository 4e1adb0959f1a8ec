//! ECS components attached to voxel entities.
//!
//! Every voxel has [`Position`], [`VoxelSize`], a
//! [`VoxelKind`](sculptor_core::VoxelKind), and an
//! [`Appearance`](sculptor_core::Appearance). Gravity voxels also carry
//! [`Falling`].

use glam::Vec3;
use sculptor_core::GridSize;

/// Center of the voxel in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Edge length the voxel was placed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelSize(pub GridSize);

/// Vertical speed of a gravity voxel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Falling {
    pub vy: f32,
}
