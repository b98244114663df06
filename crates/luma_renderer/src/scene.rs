//! Render-time scene: a flat, read-only list of primitives.
//!
//! The scene is built once before rendering and never mutated while
//! workers hold it, so it is shared by plain reference across threads.

use std::collections::HashMap;
use std::sync::Arc;

use luma_core::{BxdfDesc, MaterialDesc, SceneDescription, ShapeDesc};
use luma_math::Vec3;

use crate::hittable::{Interaction, Primitive, PrimitiveId, Shape};
use crate::{Material, Plane, Ray, RenderError, RenderResult, Sphere, Triangle};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive and return its id.
    pub fn add(&mut self, shape: impl Into<Shape>, material: Arc<Material>) -> PrimitiveId {
        let id = PrimitiveId(self.primitives.len());
        self.primitives.push(Primitive::new(shape, material));
        id
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Get a primitive by id.
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id.0)
    }

    /// Find the nearest intersection along `ray`, skipping `exclude`.
    pub fn intersect(&self, ray: &Ray, exclude: Option<PrimitiveId>) -> Interaction<'_> {
        let mut rec = Interaction::new(*ray);
        for (index, primitive) in self.primitives.iter().enumerate() {
            let id = PrimitiveId(index);
            if Some(id) != exclude {
                primitive.intersect(id, &mut rec);
            }
        }
        rec
    }

    /// Build a render scene from a description.
    ///
    /// Every primitive must reference a defined material and have
    /// non-degenerate geometry.
    pub fn from_description(desc: &SceneDescription) -> RenderResult<Self> {
        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        for material in &desc.materials {
            let previous = materials.insert(&material.name, Arc::new(build_material(material)));
            if previous.is_some() {
                return Err(RenderError::DuplicateMaterial(material.name.clone()));
            }
        }

        let mut scene = Scene::new();
        for (index, primitive) in desc.primitives.iter().enumerate() {
            let material = materials
                .get(primitive.material.as_str())
                .cloned()
                .ok_or_else(|| RenderError::UnknownMaterial {
                    primitive: index,
                    material: primitive.material.clone(),
                })?;
            scene.add(build_shape(&primitive.shape, index)?, material);
        }

        log::debug!(
            "Built scene '{}': {} primitives, {} materials",
            desc.name,
            scene.len(),
            materials.len()
        );

        Ok(scene)
    }
}

fn build_material(desc: &MaterialDesc) -> Material {
    let albedo = Vec3::from(desc.albedo);
    let material = match desc.bxdf {
        BxdfDesc::Lambertian => Material::lambertian(albedo),
        BxdfDesc::Specular { rho } => Material::specular(albedo, rho),
        BxdfDesc::Dielectric { roughness } => Material::dielectric(albedo, roughness, desc.ior),
    };

    material
        .with_emission(Vec3::from(desc.emission))
        .with_transmission(Vec3::from(desc.transmission))
}

fn build_shape(desc: &ShapeDesc, primitive: usize) -> RenderResult<Shape> {
    let degenerate = |shape| RenderError::DegenerateShape { primitive, shape };

    match *desc {
        ShapeDesc::Sphere { center, radius } => {
            if !(radius > 0.0) {
                return Err(degenerate("sphere"));
            }
            Ok(Sphere::new(Vec3::from(center), radius).into())
        }
        ShapeDesc::Plane { normal, distance } => {
            let normal = Vec3::from(normal);
            if !(normal.length_squared() > 0.0) {
                return Err(degenerate("plane"));
            }
            Ok(Plane::new(normal, distance).into())
        }
        ShapeDesc::Triangle {
            corner,
            edge_u,
            edge_v,
            normals,
        } => {
            let (corner, edge_u, edge_v) =
                (Vec3::from(corner), Vec3::from(edge_u), Vec3::from(edge_v));
            let triangle = match normals {
                Some([n0, n1, n2]) => Triangle::with_normals(
                    corner,
                    edge_u,
                    edge_v,
                    [Vec3::from(n0), Vec3::from(n1), Vec3::from(n2)],
                ),
                None => Triangle::new(corner, edge_u, edge_v),
            };
            if !(triangle.double_area() > 0.0) {
                return Err(degenerate("triangle"));
            }
            Ok(triangle.into())
        }
    }
}
