//! Session framework for the voxel sculptor.
//!
//! This crate wires input, the first-person controller, the sculpture, and
//! the tool settings into a [`Sculptor`] session, and drives it frame by
//! frame:
//! - Loading and validating configuration
//! - Frame timing with clamped delta times
//! - Per-frame update order and edit events
//! - Handing finished frames to a [`FrameSink`]
//!
//! # Example
//!
//! ```no_run
//! use sculptor_app::{init_logging, NullSink, Runner, Sculptor, SculptorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging();
//!     let sculptor = Sculptor::new(SculptorConfig::default())?;
//!     let mut runner = Runner::new(sculptor, NullSink);
//!     for _ in 0..60 {
//!         runner.step(1.0 / 60.0)?;
//!     }
//!     runner.finish();
//!     Ok(())
//! }
//! ```

mod app;
mod clock;
mod config;
mod runner;
mod session;
mod tools;

pub use app::{FrameSink, NullSink};
pub use clock::FrameClock;
pub use config::SculptorConfig;
pub use runner::{init_logging, Runner};
pub use session::{FrameEvents, Sculptor, Toggle};
pub use tools::{ToolAction, ToolSettings, GRID_LADDER};

// Re-export commonly used types for convenience
pub use sculptor_render::{Camera, RenderFrame};
pub use sculptor_world::{SculptureSnapshot, VoxelId};
