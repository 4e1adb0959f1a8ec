//! Picking against voxel boxes and the room's inner surfaces.

use glam::Vec3;

use sculptor_core::math::{Aabb, Ray};

use crate::room::{Room, RoomSurface};

/// What a pick ray struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget<I> {
    /// An inner surface of the room.
    Room(RoomSurface),
    /// A box supplied by the caller.
    Voxel(I),
}

/// Result of a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<I> {
    /// World-space point on the struck face
    pub point: Vec3,
    /// Unit normal of the struck face, pointing back toward the ray origin
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    pub target: HitTarget<I>,
}

impl<I: Copy> RaycastHit<I> {
    /// Id of the struck voxel, if any.
    pub fn voxel(&self) -> Option<I> {
        match self.target {
            HitTarget::Voxel(id) => Some(id),
            HitTarget::Room(_) => None,
        }
    }
}

/// Nearest hit along `ray` within `reach`, over `boxes` and the room.
///
/// Boxes are tested one by one; voxel counts stay small enough that no
/// acceleration structure is needed. On an exact tie a voxel wins over the
/// room surface it rests on.
pub fn raycast<I, B>(ray: &Ray, reach: f32, room: &Room, boxes: B) -> Option<RaycastHit<I>>
where
    I: Copy,
    B: IntoIterator<Item = (I, Aabb)>,
{
    let mut best: Option<RaycastHit<I>> = None;

    for (id, aabb) in boxes {
        let Some((distance, normal)) = aabb.raycast_face(ray) else {
            continue;
        };
        if distance > reach || best.is_some_and(|hit| hit.distance <= distance) {
            continue;
        }
        best = Some(RaycastHit {
            point: ray.at(distance),
            normal,
            distance,
            target: HitTarget::Voxel(id),
        });
    }

    if let Some((distance, normal, surface)) = room.raycast_inner(ray) {
        let closer = best.map_or(true, |hit| distance < hit.distance);
        if distance <= reach && closer {
            best = Some(RaycastHit {
                point: ray.at(distance),
                normal,
                distance,
                target: HitTarget::Room(surface),
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, 1.0)
    }

    #[test]
    fn empty_scene_hits_the_floor() {
        let room = Room::default();
        let ray = Ray::new(Vec3::new(0.5, 3.0, 0.5), Vec3::NEG_Y);
        let hit = raycast(&ray, 100.0, &room, std::iter::empty::<(u32, Aabb)>()).unwrap();
        assert_eq!(hit.target, HitTarget::Room(RoomSurface::Floor));
        assert_eq!(hit.voxel(), None);
        assert_relative_eq!(hit.distance, 3.0);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn nearest_voxel_wins() {
        let room = Room::default();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 10.0), Vec3::NEG_Z);
        let boxes = [
            (1_u32, cube(Vec3::new(0.5, 0.5, 0.5))),
            (2_u32, cube(Vec3::new(0.5, 0.5, 4.5))),
            (3_u32, cube(Vec3::new(3.5, 0.5, 6.5))),
        ];
        let hit = raycast(&ray, 100.0, &room, boxes).unwrap();
        assert_eq!(hit.voxel(), Some(2));
        assert_eq!(hit.normal, Vec3::Z);
        assert_relative_eq!(hit.point.z, 5.0);
        assert_relative_eq!(hit.distance, 5.0);
    }

    #[test]
    fn voxel_shadows_the_floor_beneath_it() {
        let room = Room::default();
        let ray = Ray::new(Vec3::new(0.5, 3.0, 0.5), Vec3::NEG_Y);
        let hit = raycast(&ray, 100.0, &room, [(7_u32, cube(Vec3::splat(0.5)))]).unwrap();
        assert_eq!(hit.voxel(), Some(7));
        assert_eq!(hit.normal, Vec3::Y);
        assert_relative_eq!(hit.point.y, 1.0);
    }

    #[test]
    fn reach_limits_hits() {
        let room = Room::default();
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Z);
        assert!(raycast(&ray, 5.0, &room, std::iter::empty::<(u32, Aabb)>()).is_none());
        let hit = raycast(&ray, 25.0, &room, std::iter::empty::<(u32, Aabb)>()).unwrap();
        assert_eq!(hit.target, HitTarget::Room(RoomSurface::Wall));
    }
}
