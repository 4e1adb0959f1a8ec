//! Grid sizes, cell indices, and snapping.
//!
//! A grid of size `S` partitions space into cubes whose min corners sit on
//! integer multiples of `S`. Voxels are always placed at the center of a cell.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::Aabb;

/// Edge length of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct GridSize(f32);

impl GridSize {
    /// Unit grid
    pub const ONE: Self = Self(1.0);

    /// Create a grid size, rejecting non-positive or non-finite values.
    pub fn new(size: f32) -> Result<Self> {
        if size.is_finite() && size > 0.0 {
            Ok(Self(size))
        } else {
            Err(Error::InvalidConfig(format!(
                "grid size must be positive and finite, got {size}"
            )))
        }
    }

    /// Edge length in world units
    #[inline]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Half the edge length
    #[inline]
    pub fn half(self) -> f32 {
        self.0 * 0.5
    }

    /// Cell containing `point`.
    #[inline]
    pub fn snap(self, point: Vec3) -> GridCell {
        let scaled = (point / self.0).floor();
        GridCell(IVec3::new(scaled.x as i32, scaled.y as i32, scaled.z as i32))
    }

    /// Cell adjacent to the face struck at `hit_point` with outward `normal`.
    ///
    /// The hit point is pushed half a cell along the normal before snapping so
    /// that the result lands on the empty side of the face.
    #[inline]
    pub fn placement_cell(self, hit_point: Vec3, normal: Vec3) -> GridCell {
        self.snap(hit_point + normal * self.half())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f32> for GridSize {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<GridSize> for f32 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

/// Integer cell index on a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell(pub IVec3);

impl GridCell {
    /// Create a new cell index
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Min corner of the cell, an integer multiple of the grid size.
    #[inline]
    pub fn min_corner(self, size: GridSize) -> Vec3 {
        self.0.as_vec3() * size.get()
    }

    /// Center of the cell.
    #[inline]
    pub fn center(self, size: GridSize) -> Vec3 {
        self.min_corner(size) + Vec3::splat(size.half())
    }

    /// Bounds of the cell.
    #[inline]
    pub fn bounds(self, size: GridSize) -> Aabb {
        let min = self.min_corner(size);
        Aabb::new(min, min + Vec3::splat(size.get()))
    }
}

/// Returns `true` if `center` lies on a cell center of `size`.
pub fn is_cell_center(center: Vec3, size: GridSize) -> bool {
    let steps = (center - Vec3::splat(size.half())) / size.get();
    (steps - steps.round()).abs().max_element() < 1e-4
}
