//! Sphere primitive for ray tracing.

use crate::hittable::{ShapeHit, HIT_EPSILON};
use crate::Ray;
use luma_math::{Vec2, Vec3};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Nearest root of the ray-sphere quadratic in `(HIT_EPSILON, t_max)`.
    pub fn intersect(&self, ray: &Ray, t_max: f32) -> Option<ShapeHit> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        // Also rejects NaN directions
        if !(a > 0.0) {
            return None;
        }

        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // Origin outside the sphere and moving away from it
        if h < 0.0 && c > 0.0 {
            return None;
        }

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearer root first; the farther one only if we start inside
        let mut root = (h - sqrtd) / a;
        if root <= HIT_EPSILON {
            root = (h + sqrtd) / a;
            if root <= HIT_EPSILON {
                return None;
            }
        }

        if !(root < t_max) {
            return None;
        }

        Some(ShapeHit {
            t: root,
            uv: Vec2::ZERO,
        })
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        (position - self.center).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray, f32::INFINITY).unwrap();
        assert!((hit.t - 0.5).abs() < 0.001); // Should hit at t=0.5
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));

        let hit = sphere.intersect(&ray, f32::INFINITY).unwrap();
        assert!((ray.at(hit.t) - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray, f32::INFINITY).is_none());

        // Sphere behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray, f32::INFINITY).is_none());
    }

    #[test]
    fn test_sphere_from_inside_takes_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.intersect(&ray, f32::INFINITY).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_respects_t_max() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(sphere.intersect(&ray, 4.0).is_none());
        // Equal is not strictly closer
        let t = sphere.intersect(&ray, f32::INFINITY).unwrap().t;
        assert!(sphere.intersect(&ray, t).is_none());
        assert!(sphere.intersect(&ray, 4.5).is_some());
    }

    #[test]
    fn test_sphere_degenerate_rays() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);

        let zero = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(sphere.intersect(&zero, f32::INFINITY).is_none());

        let nan = Ray::new(Vec3::ZERO, Vec3::splat(f32::NAN));
        assert!(sphere.intersect(&nan, f32::INFINITY).is_none());
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let normal = sphere.normal_at(Vec3::new(1.0, 2.0, 0.0));
        assert!((normal - Vec3::Y).length() < 1e-6);
        assert!((normal.length() - 1.0).abs() < 1e-6);
    }
}
