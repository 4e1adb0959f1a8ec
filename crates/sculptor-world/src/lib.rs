//! Voxel sculpture storage for the voxel sculptor.
//!
//! Voxels live as entities in a [`hecs::World`]. Occupancy, picking, and
//! landing checks are linear scans over that world.

pub mod components;
pub mod sculpture;
pub mod snapshot;

pub use components::{Falling, Position, VoxelSize};
pub use sculpture::{Brush, SculptError, Sculpture, SculptureSettings, VoxelId, VoxelView};
pub use snapshot::{SculptureSnapshot, VoxelRecord};
