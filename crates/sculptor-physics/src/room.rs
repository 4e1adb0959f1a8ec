//! The bounded room the sculptor works in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use sculptor_core::math::{Aabb, Ray};
use sculptor_core::{Error, Result};

/// Which inner surface of the room a ray struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSurface {
    Floor,
    Ceiling,
    Wall,
}

/// Axis-aligned room: floor at `y = 0`, walls at `±half_extent` on x and z,
/// ceiling at `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Room {
    /// Distance from the center to each wall
    pub half_extent: f32,
    /// Floor-to-ceiling height
    pub height: f32,
    /// How close the camera may get to a wall or the ceiling
    pub margin: f32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            half_extent: 20.0,
            height: 12.0,
            margin: 0.3,
        }
    }
}

impl Room {
    /// Reject rooms the camera cannot fit into.
    pub fn validate(&self, eye_height: f32) -> Result<()> {
        for (name, value) in [("half_extent", self.half_extent), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "room {name} must be positive and finite, got {value}"
                )));
            }
        }
        if !(self.margin >= 0.0 && self.margin < self.half_extent) {
            return Err(Error::InvalidConfig(format!(
                "room margin {} must be within [0, half_extent {})",
                self.margin, self.half_extent
            )));
        }
        if self.height - self.margin <= eye_height {
            return Err(Error::InvalidConfig(format!(
                "room height {} leaves no headroom above eye height {eye_height}",
                self.height
            )));
        }
        Ok(())
    }

    /// Interior volume of the room.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.half_extent, 0.0, -self.half_extent),
            Vec3::new(self.half_extent, self.height, self.half_extent),
        )
    }

    /// Region the camera is clamped into, with `floor` as its lowest height.
    pub fn camera_bounds(&self, floor: f32) -> Aabb {
        let reach = self.half_extent - self.margin;
        Aabb::new(
            Vec3::new(-reach, floor, -reach),
            Vec3::new(reach, self.height - self.margin, reach),
        )
    }

    /// Clamp a camera position into [`Room::camera_bounds`].
    pub fn clamp_camera(&self, position: Vec3, floor: f32) -> Vec3 {
        let bounds = self.camera_bounds(floor);
        position.clamp(bounds.min, bounds.max)
    }

    /// Whether a box lies inside the room (shared faces allowed).
    pub fn contains(&self, aabb: &Aabb) -> bool {
        self.bounds().contains_aabb(aabb, 1e-4)
    }

    /// Cast a ray from inside the room to the surface it leaves through.
    ///
    /// Returns the distance, the inward-facing normal, and the surface kind.
    pub fn raycast_inner(&self, ray: &Ray) -> Option<(f32, Vec3, RoomSurface)> {
        let bounds = self.bounds();
        if !bounds.contains_point(ray.origin) {
            return None;
        }

        let inv_dir = Vec3::ONE / ray.direction;
        let t1 = (bounds.min - ray.origin) * inv_dir;
        let t2 = (bounds.max - ray.origin) * inv_dir;
        let t_max = t1.max(t2);
        let t_far = t_max.min_element();
        if !t_far.is_finite() || t_far < 0.0 {
            return None;
        }

        let (normal, surface) = if t_far == t_max.y {
            if ray.direction.y < 0.0 {
                (Vec3::Y, RoomSurface::Floor)
            } else {
                (Vec3::NEG_Y, RoomSurface::Ceiling)
            }
        } else if t_far == t_max.x {
            (Vec3::new(-ray.direction.x.signum(), 0.0, 0.0), RoomSurface::Wall)
        } else {
            (Vec3::new(0.0, 0.0, -ray.direction.z.signum()), RoomSurface::Wall)
        };

        Some((t_far, normal, surface))
    }
}
