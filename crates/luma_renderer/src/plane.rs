//! Infinite plane primitive.
//!
//! Stored in Hesse normal form: all points `p` with `normal . p = distance`
//! where `normal` is unit length. Planes are one-sided and only visible
//! from the side their normal points to.

use crate::hittable::{ShapeHit, HIT_EPSILON};
use crate::Ray;
use luma_math::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and a signed
    /// distance along it. Both are rescaled by the normal's length.
    ///
    /// A zero normal gives a plane no ray can hit.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let length = normal.length();
        if length > 0.0 {
            Self {
                normal: normal / length,
                distance: distance / length,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Plane through `point` facing along `normal`.
    pub fn through(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn intersect(&self, ray: &Ray, t_max: f32) -> Option<ShapeHit> {
        let denominator = self.normal.dot(ray.direction());
        // Parallel, facing away, or NaN
        if !(denominator < 0.0) {
            return None;
        }

        let numerator = self.distance - self.normal.dot(ray.origin());
        let t = numerator / denominator;
        if !(t > HIT_EPSILON && t < t_max) {
            return None;
        }

        Some(ShapeHit { t, uv: Vec2::ZERO })
    }

    #[inline]
    pub fn normal_at(&self) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        // y = -1, facing up
        Plane::new(Vec3::Y, -1.0)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);
        let hit = floor().intersect(&ray, f32::INFINITY).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_rescales_normal() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), -2.0);
        assert_eq!(plane, floor());
    }

    #[test]
    fn test_plane_through_point() {
        let plane = Plane::through(Vec3::new(3.0, -1.0, 7.0), Vec3::Y * 5.0);
        assert!((plane.distance() - -1.0).abs() < 1e-6);
        assert_eq!(plane.normal(), Vec3::Y);
    }

    #[test]
    fn test_plane_rejects_parallel_and_back_facing() {
        let parallel = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(floor().intersect(&parallel, f32::INFINITY).is_none());

        // From below, looking up at the back side
        let below = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        assert!(floor().intersect(&below, f32::INFINITY).is_none());
    }

    #[test]
    fn test_plane_behind_origin() {
        // Below the floor looking further down: facing the normal's
        // opposite, but the plane is behind the ray
        let ray = Ray::new(Vec3::new(0.0, -2.0, 0.0), -Vec3::Y);
        assert!(floor().intersect(&ray, f32::INFINITY).is_none());
    }

    #[test]
    fn test_plane_respects_t_max() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert!(floor().intersect(&ray, 0.5).is_none());
        assert!(floor().intersect(&ray, 1.0).is_none());
        assert!(floor().intersect(&ray, 1.5).is_some());
    }

    #[test]
    fn test_zero_normal_never_hits() {
        let plane = Plane::new(Vec3::ZERO, 1.0);
        for dir in [Vec3::X, Vec3::Y, -Vec3::Z] {
            assert!(plane.intersect(&Ray::new(Vec3::ZERO, dir), f32::INFINITY).is_none());
        }
    }
}
