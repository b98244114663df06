//! Primitives, shapes and the per-ray hit record.

use std::sync::Arc;

use crate::{Material, Plane, Ray, Sphere, Triangle};
use luma_math::{Vec2, Vec3};

/// Minimum ray parameter accepted as a hit.
pub const HIT_EPSILON: f32 = 1e-4;

/// Which kind of shape a hit record currently refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitKind {
    #[default]
    None,
    Sphere,
    Plane,
    Triangle,
}

/// Index of a primitive inside its [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// Result of a successful shape intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// Local surface coordinates (barycentric for triangles)
    pub uv: Vec2,
}

/// World-space surface data, resolved lazily from a hit record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Geometry of a primitive. A closed set of shapes, each with its own
/// closed-form intersection routine.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Shape {
    /// Test the ray against this shape.
    ///
    /// Only hits with `HIT_EPSILON < t < t_max` are reported, so passing the
    /// current closest `t` as `t_max` keeps strictly closer hits only.
    #[inline]
    pub fn intersect(&self, ray: &Ray, t_max: f32) -> Option<ShapeHit> {
        match self {
            Shape::Sphere(s) => s.intersect(ray, t_max),
            Shape::Plane(p) => p.intersect(ray, t_max),
            Shape::Triangle(t) => t.intersect(ray, t_max),
        }
    }

    /// Unit surface normal at a hit.
    #[inline]
    pub fn normal_at(&self, position: Vec3, uv: Vec2) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal_at(position),
            Shape::Plane(p) => p.normal_at(),
            Shape::Triangle(t) => t.normal_at(uv),
        }
    }

    /// Tag stored in hit records for this shape.
    pub fn kind(&self) -> HitKind {
        match self {
            Shape::Sphere(_) => HitKind::Sphere,
            Shape::Plane(_) => HitKind::Plane,
            Shape::Triangle(_) => HitKind::Triangle,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// A shape bound to exactly one material.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Arc<Material>,
}

impl Primitive {
    /// Create a new primitive. The material is mandatory.
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Test the ray in `rec` against this primitive and, if the hit is
    /// strictly closer than the one already recorded, overwrite the record.
    pub fn intersect<'a>(&'a self, id: PrimitiveId, rec: &mut Interaction<'a>) -> bool {
        match self.shape.intersect(&rec.ray, rec.t_max()) {
            Some(hit) => {
                rec.kind = self.shape.kind();
                rec.t = hit.t;
                rec.uv = hit.uv;
                rec.hit = Some((id, self));
                true
            }
            None => false,
        }
    }
}

/// Transient record of the nearest intersection found so far along a ray.
#[derive(Debug, Clone)]
pub struct Interaction<'a> {
    /// The ray being traced
    pub ray: Ray,
    /// Shape kind of the current closest hit
    pub kind: HitKind,
    /// Ray parameter of the current closest hit
    pub t: f32,
    /// Local surface coordinates of the current closest hit
    pub uv: Vec2,
    hit: Option<(PrimitiveId, &'a Primitive)>,
}

impl<'a> Interaction<'a> {
    /// Start an empty record for `ray`.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            kind: HitKind::None,
            t: 0.0,
            uv: Vec2::ZERO,
            hit: None,
        }
    }

    /// Whether any primitive has been hit.
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    /// Upper bound for the next candidate hit.
    #[inline]
    pub fn t_max(&self) -> f32 {
        if self.is_hit() {
            self.t
        } else {
            f32::INFINITY
        }
    }

    /// The closest primitive hit so far.
    pub fn primitive(&self) -> Option<&'a Primitive> {
        self.hit.map(|(_, p)| p)
    }

    /// Id of the closest primitive hit so far.
    pub fn primitive_id(&self) -> Option<PrimitiveId> {
        self.hit.map(|(id, _)| id)
    }

    /// Compute world position and normal of the hit.
    pub fn resolve(&self) -> Option<SurfacePoint> {
        let primitive = self.primitive()?;
        let position = self.ray.at(self.t);
        let normal = primitive.shape.normal_at(position, self.uv);
        Some(SurfacePoint { position, normal })
    }
}
