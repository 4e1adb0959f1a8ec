//! Room bounds, gravity, first-person movement, and picking for the voxel sculptor.
//!
//! Nothing here knows about voxels as entities: picking takes any iterator of
//! `(id, Aabb)` pairs and hands the id back on a hit.

pub mod controller;
pub mod gravity;
pub mod raycast;
pub mod room;

pub use controller::{ControllerSettings, FirstPersonController, MotionMode, MoveIntent};
pub use gravity::VerticalBody;
pub use raycast::{raycast, HitTarget, RaycastHit};
pub use room::{Room, RoomSurface};
