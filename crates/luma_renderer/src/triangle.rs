//! Triangle primitive for ray tracing.
//!
//! A triangle is a corner point plus two edge vectors. The geometric normal
//! is `edge_u x edge_v`; only the side it points to is hit. Shading normals
//! are blended from three corner normals so meshes can be smooth shaded.

use crate::hittable::{ShapeHit, HIT_EPSILON};
use crate::Ray;
use luma_math::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    corner: Vec3,
    edge_u: Vec3,
    edge_v: Vec3,
    /// Geometric normal, not normalized
    true_normal: Vec3,
    /// Shading normals at corner, corner + edge_u, corner + edge_v
    corner_normals: [Vec3; 3],
}

impl Triangle {
    /// Create a flat-shaded triangle.
    pub fn new(corner: Vec3, edge_u: Vec3, edge_v: Vec3) -> Self {
        let true_normal = edge_u.cross(edge_v);
        let flat = true_normal.normalize_or_zero();
        Self {
            corner,
            edge_u,
            edge_v,
            true_normal,
            corner_normals: [flat; 3],
        }
    }

    /// Create a triangle with per-corner normals (for smooth shading).
    pub fn with_normals(corner: Vec3, edge_u: Vec3, edge_v: Vec3, normals: [Vec3; 3]) -> Self {
        Self {
            corner_normals: normals,
            ..Self::new(corner, edge_u, edge_v)
        }
    }

    /// Create a flat-shaded triangle from three vertices in counter-clockwise
    /// order as seen from the front.
    pub fn from_vertices(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self::new(v0, v1 - v0, v2 - v0)
    }

    /// Twice the triangle's area.
    pub fn double_area(&self) -> f32 {
        self.true_normal.length()
    }

    /// Determinant form of the ray-triangle test.
    ///
    /// `uv` of the hit holds the weights of `edge_u` and `edge_v`.
    pub fn intersect(&self, ray: &Ray, t_max: f32) -> Option<ShapeHit> {
        let det = ray.direction().dot(self.true_normal);
        // Back-facing, parallel, degenerate, or NaN
        if !(det < 0.0) {
            return None;
        }

        let delta = ray.origin() - self.corner;
        let t = -self.true_normal.dot(delta) / det;
        if !(t > HIT_EPSILON && t < t_max) {
            return None;
        }

        // Denormal det overflows to infinity
        let inv_det = 1.0 / det;
        if !inv_det.is_finite() {
            return None;
        }

        let cross = delta.cross(ray.direction());
        let s = -cross.dot(self.edge_v) * inv_det;
        let r = cross.dot(self.edge_u) * inv_det;

        // Written positively so NaN coordinates fall outside
        if !(s >= 0.0 && r >= 0.0 && s + r <= 1.0) {
            return None;
        }

        Some(ShapeHit {
            t,
            uv: Vec2::new(s, r),
        })
    }

    /// Barycentric blend of the corner normals, renormalized.
    #[inline]
    pub fn normal_at(&self, uv: Vec2) -> Vec3 {
        let [n0, n1, n2] = self.corner_normals;
        (n0 * (1.0 - uv.x - uv.y) + n1 * uv.x + n2 * uv.y).normalize_or_zero()
    }
}
