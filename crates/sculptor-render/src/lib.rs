//! Render-side data for the voxel sculptor.
//!
//! This crate turns session state into GPU-ready data:
//! - Camera matrices and uniforms
//! - Per-voxel instances with resolved materials
//! - Lighting
//! - Complete frames handed to a renderer

pub mod camera;
pub mod frame;
pub mod instance;
pub mod lighting;

pub use camera::{Camera, CameraUniforms};
pub use frame::{Highlight, RenderFrame};
pub use instance::VoxelInstance;
pub use lighting::{LightingRig, LightingUniforms};
