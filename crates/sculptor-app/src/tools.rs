//! The active tool and the look of the next voxel.

use serde::{Deserialize, Serialize};

use sculptor_core::{Appearance, Error, GridSize, Result, VoxelKind};
use sculptor_world::Brush;

/// Grid sizes the user can step through.
pub const GRID_LADDER: [f32; 4] = [0.25, 0.5, 1.0, 2.0];

/// What a click does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolAction {
    #[default]
    Add,
    Remove,
}

impl ToolAction {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Add => Self::Remove,
            Self::Remove => Self::Add,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub action: ToolAction,
    pub kind: VoxelKind,
    pub grid_size: GridSize,
    pub appearance: Appearance,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            action: ToolAction::Add,
            kind: VoxelKind::Static,
            grid_size: GridSize::ONE,
            appearance: Appearance::default(),
        }
    }
}

impl ToolSettings {
    pub fn validate(&self) -> Result<()> {
        if !GRID_LADDER.contains(&self.grid_size.get()) {
            return Err(Error::InvalidConfig(format!(
                "grid size {} is not one of {GRID_LADDER:?}",
                self.grid_size.get()
            )));
        }
        self.appearance.validate()
    }

    /// What the next placement will create.
    pub const fn brush(&self) -> Brush {
        Brush {
            kind: self.kind,
            size: self.grid_size,
            appearance: self.appearance,
        }
    }

    /// Step to the next larger grid size. Returns `false` at the top.
    pub fn grow_grid(&mut self) -> bool {
        let current = self.grid_size.get();
        self.set_grid_from(GRID_LADDER.iter().copied().find(|&s| s > current))
    }

    /// Step to the next smaller grid size. Returns `false` at the bottom.
    pub fn shrink_grid(&mut self) -> bool {
        let current = self.grid_size.get();
        self.set_grid_from(GRID_LADDER.iter().rev().copied().find(|&s| s < current))
    }

    fn set_grid_from(&mut self, size: Option<f32>) -> bool {
        match size.map(GridSize::new) {
            Some(Ok(size)) => {
                self.grid_size = size;
                true
            }
            _ => false,
        }
    }
}
