//! Core types, grid math, and errors for the voxel sculptor.
//!
//! This crate provides the foundational types shared by every other crate:
//! - Grid sizes, cell indices, and snapping
//! - Rays and axis-aligned boxes
//! - Voxel kinds and appearance parameters
//! - The common error type

pub mod error;
pub mod grid;
pub mod math;
pub mod types;

pub use error::{Error, Result};
pub use grid::{GridCell, GridSize};
pub use math::{Aabb, Ray};
pub use types::{Appearance, Color, Material, Shading, VoxelKind};

/// Sculptor-wide constants
pub mod constants {
    /// Downward acceleration in units per second squared
    pub const GRAVITY: f32 = 9.8;
    /// Fraction of the grid size under which two voxel centers share a cell
    pub const OCCUPANCY_EPSILON: f32 = 0.5;
    /// Camera height above the floor while walking
    pub const EYE_HEIGHT: f32 = 1.5;
    /// Slack above the walk floor that still counts as standing on it
    pub const GROUNDED_TOLERANCE: f32 = 0.01;
}
