//! Math types and helpers
//!
//! Re-exports the nalgebra types the rest of the crate builds on, plus the
//! yaw-only world transform used when testing rays against enemy meshes.

pub use nalgebra::{Matrix4, Point3 as NPoint3, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = NPoint3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * constants::RAD_TO_DEG
}

/// Build the world transform of a yawing actor: translation * yaw * scale.
///
/// Actors in the arena only ever rotate about the world up axis, so the full
/// TRS composition collapses to a single-axis rotation. The yaw convention
/// follows the movement code: facing direction is
/// `(cos(yaw), 0, -sin(yaw))` for a yaw given in degrees.
pub fn yaw_transform(position: Vec3, yaw_deg: f32, scale: Vec3) -> Mat4 {
    Mat4::new_translation(&position)
        * Mat4::from_axis_angle(&Vec3::y_axis(), deg_to_rad(yaw_deg))
        * Mat4::new_nonuniform_scaling(&scale)
}

/// Transform a point by a homogeneous matrix
#[inline]
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(point)).coords
}

/// Facing direction on the ground plane for a yaw in degrees
#[inline]
pub fn yaw_direction(yaw_deg: f32) -> Vec3 {
    let yaw = deg_to_rad(yaw_deg);
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn yaw_transform_rotates_about_up_axis() {
        let m = yaw_transform(Vec3::zeros(), 90.0, Vec3::new(1.0, 1.0, 1.0));
        let p = transform_point(&m, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn yaw_transform_applies_translation_last() {
        let m = yaw_transform(Vec3::new(5.0, 1.0, -2.0), 0.0, Vec3::new(2.0, 2.0, 2.0));
        let p = transform_point(&m, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 7.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn yaw_direction_matches_movement_convention() {
        let d = yaw_direction(0.0);
        assert_relative_eq!(d.x, 1.0, epsilon = 1e-6);
        let d = yaw_direction(90.0);
        assert_relative_eq!(d.z, -1.0, epsilon = 1e-5);
    }
}
