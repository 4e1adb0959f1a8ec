//! Serializable copies of a sculpture.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use sculptor_core::{Appearance, Error, GridSize, Result, VoxelKind};

use crate::sculpture::VoxelView;

/// Snapshot format version written by [`SculptureSnapshot::encode`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// One saved voxel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelRecord {
    pub center: Vec3,
    pub size: GridSize,
    pub kind: VoxelKind,
    pub appearance: Appearance,
    /// Vertical speed at the time of the snapshot; zero for static voxels.
    pub vy: f32,
}

impl VoxelRecord {
    pub(crate) fn from_view(view: &VoxelView, vy: f32) -> Self {
        Self {
            center: view.center,
            size: view.size,
            kind: view.kind,
            appearance: view.appearance,
            vy,
        }
    }
}

/// Every voxel of a sculpture at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SculptureSnapshot {
    pub version: u32,
    pub voxels: Vec<VoxelRecord>,
}

impl SculptureSnapshot {
    pub fn new(voxels: Vec<VoxelRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            voxels,
        }
    }

    /// Encode to the compact binary form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode bytes produced by [`SculptureSnapshot::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Serialization(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}
