//! Axis-aligned bounding volumes
//!
//! Boxes are always derived fresh from a center position and half-extents.
//! They are never cached across a position change: the probe rig and the
//! contact resolver operate on just-computed boxes, and a stale box silently
//! misclassifies contacts.

use crate::foundation::math::Vec3;

/// Axis-aligned bounding box in world space
///
/// Invariant: `min <= max` componentwise. Construction from a center and
/// non-negative half-extents guarantees this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from a center position and non-negative half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Build the box around a sphere, for radius-shaped bodies
    pub fn from_center_radius(center: Vec3, radius: f32) -> Self {
        Self::from_center_half_extents(center, Vec3::new(radius, radius, radius))
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Overlap test, inclusive on touching faces
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Test whether a point lies inside the box (inclusive)
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_box_keeps_min_below_max() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, -2.0, 3.0), Vec3::new(2.0, 1.0, 0.5));
        assert!(aabb.min.x <= aabb.max.x);
        assert!(aabb.min.y <= aabb.max.y);
        assert!(aabb.min.z <= aabb.max.z);
        assert_eq!(aabb.min, Vec3::new(-1.0, -3.0, 2.5));
        assert_eq!(aabb.max, Vec3::new(3.0, -1.0, 3.5));
    }

    #[test]
    fn overlap_is_inclusive_on_touching_faces() {
        let a = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(a.intersects(&b));

        let c = Aabb::from_center_half_extents(Vec3::new(2.01, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn center_and_half_extents_round_trip() {
        let center = Vec3::new(4.0, 5.0, 6.0);
        let half = Vec3::new(1.5, 2.5, 0.25);
        let aabb = Aabb::from_center_half_extents(center, half);
        assert_eq!(aabb.center(), center);
        assert_eq!(aabb.half_extents(), half);
    }

    #[test]
    fn contains_point_inclusive() {
        let aabb = Aabb::from_center_radius(Vec3::zeros(), 1.0);
        assert!(aabb.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!aabb.contains(Vec3::new(1.1, 0.0, 0.0)));
    }
}
