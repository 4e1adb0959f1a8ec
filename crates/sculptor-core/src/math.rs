//! Rays and axis-aligned boxes.

use glam::Vec3;

/// Ray for picking.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube of edge `size` centered at `center`
    #[inline]
    pub fn from_center_size(center: Vec3, size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the AABB
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside the AABB (boundary included)
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check if `other` lies entirely inside this AABB, allowing `tolerance`
    /// of overhang on every face.
    #[inline]
    pub fn contains_aabb(&self, other: &Self, tolerance: f32) -> bool {
        let slack = Vec3::splat(tolerance);
        other.min.cmpge(self.min - slack).all() && other.max.cmple(self.max + slack).all()
    }

    /// Check if the interiors of two AABBs overlap.
    ///
    /// Boxes that only share a face do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Check if the x/z footprints of two AABBs overlap.
    #[inline]
    pub fn overlaps_footprint(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Distance to the face a ray enters through, and that face's outward normal.
    ///
    /// Rays starting inside the box report no hit.
    pub fn raycast_face(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut entry_axis = 0;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction == 0.0 {
                // Parallel to this slab: inside it or never.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - origin) / direction;
            let t2 = (hi - origin) / direction;
            let (enter, exit) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            // The entry face lies on the axis whose slab was entered last.
            if enter > t_near {
                t_near = enter;
                entry_axis = axis;
            }
            t_far = t_far.min(exit);
        }

        if t_near > t_far || t_near < 0.0 {
            return None;
        }

        let mut normal = Vec3::ZERO;
        normal[entry_axis] = -ray.direction[entry_axis].signum();
        Some((t_near, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn aabb_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.5, 0.5)));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Aabb::from_center_size(Vec3::splat(0.5), 1.0);
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.5, 0.5), 1.0);
        let c = Aabb::from_center_size(Vec3::new(1.2, 0.5, 0.5), 1.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(a.overlaps_footprint(&c));
    }

    #[test]
    fn containment_with_tolerance() {
        let room = Aabb::new(Vec3::splat(-2.0), Vec3::splat(2.0));
        let inside = Aabb::from_center_size(Vec3::splat(1.5), 1.0);
        let poking = Aabb::from_center_size(Vec3::splat(1.8), 1.0);
        assert!(room.contains_aabb(&inside, 0.0));
        assert!(!room.contains_aabb(&poking, 1e-4));
    }

    #[test]
    fn raycast_face_reports_entry_normal() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        let ray = Ray::new(Vec3::new(0.5, 3.0, 0.5), Vec3::NEG_Y);
        let (t, normal) = aabb.raycast_face(&ray).unwrap();
        assert_relative_eq!(t, 2.0);
        assert_eq!(normal, Vec3::Y);

        let ray = Ray::new(Vec3::new(0.5, 0.5, -4.0), Vec3::Z);
        let (t, normal) = aabb.raycast_face(&ray).unwrap();
        assert_relative_eq!(t, 4.0);
        assert_eq!(normal, Vec3::NEG_Z);
    }

    #[test]
    fn raycast_face_along_a_face_plane() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.5, 4.0), Vec3::NEG_Z);
        let (t, normal) = aabb.raycast_face(&ray).unwrap();
        assert_relative_eq!(t, 3.0);
        assert_eq!(normal, Vec3::Z);
    }

    #[test]
    fn raycast_face_ignores_rays_from_inside() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        assert!(aabb.raycast_face(&ray).is_none());
    }
}
