//! Scene description types for Luma.
//!
//! This module defines the renderer-agnostic description of a scene:
//! named materials, primitives that reference them by name, a camera and
//! optional render settings. Descriptions are plain data and deserialize
//! from JSON; the renderer turns them into its own read-only scene.

use serde::{Deserialize, Serialize};

use luma_math::Vec3;

/// A reflectance model and its variant-specific parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BxdfDesc {
    /// Ideal diffuse reflector.
    Lambertian,

    /// Ideal mirror with a fixed, angle-independent reflectance weight.
    Specular {
        #[serde(default = "default_rho")]
        rho: f32,
    },

    /// Fresnel-blended glossy surface. `roughness` is the probability of
    /// taking the diffuse lobe on a bounce.
    Dielectric {
        #[serde(default = "default_roughness")]
        roughness: f32,
    },
}

fn default_rho() -> f32 {
    1.0
}

fn default_roughness() -> f32 {
    0.5
}

/// A named material definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDesc {
    /// Name primitives use to reference this material
    pub name: String,

    /// Reflectance model
    pub bxdf: BxdfDesc,

    /// Base reflectance color (RGB, 0-1)
    #[serde(default = "default_albedo")]
    pub albedo: [f32; 3],

    /// Transmission color (carried, not used by any model yet)
    #[serde(default)]
    pub transmission: [f32; 3],

    /// Index of refraction relative to vacuum
    #[serde(default = "default_ior")]
    pub ior: f32,

    /// Emitted radiance (RGB, unbounded)
    #[serde(default)]
    pub emission: [f32; 3],
}

fn default_albedo() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_ior() -> f32 {
    1.5
}

impl MaterialDesc {
    /// Create a material with default albedo, no emission and glass-like IOR.
    pub fn new(name: impl Into<String>, bxdf: BxdfDesc) -> Self {
        Self {
            name: name.into(),
            bxdf,
            albedo: default_albedo(),
            transmission: [0.0; 3],
            ior: default_ior(),
            emission: [0.0; 3],
        }
    }

    /// Set the base reflectance color.
    pub fn with_albedo(mut self, albedo: Vec3) -> Self {
        self.albedo = albedo.to_array();
        self
    }

    /// Set the emitted radiance.
    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission.to_array();
        self
    }

    /// Set the index of refraction.
    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        Vec3::from(self.emission).length_squared() > 0.0
    }
}

/// Geometry of a primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
    },

    /// Plane in Hesse normal form: points `p` with `normal . p = distance`.
    /// The normal need not be unit length; the renderer rescales both.
    Plane {
        normal: [f32; 3],
        distance: f32,
    },

    /// Triangle spanned by `corner + s * edge_u + r * edge_v`.
    Triangle {
        corner: [f32; 3],
        edge_u: [f32; 3],
        edge_v: [f32; 3],
        /// Optional per-corner normals for smooth shading
        #[serde(default, skip_serializing_if = "Option::is_none")]
        normals: Option<[[f32; 3]; 3]>,
    },
}

/// A shape bound to a named material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveDesc {
    #[serde(flatten)]
    pub shape: ShapeDesc,

    /// Name of a material in [`SceneDescription::materials`]
    pub material: String,
}

/// Pinhole camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDesc {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        // Eye half a unit behind a unit-high image plane at z = 0
        Self {
            position: [0.0, 0.0, -0.5],
            look_at: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
            vfov: 90.0,
        }
    }
}

/// Optional render settings. Unset fields keep whatever the renderer
/// already has, so settings from several sources can be layered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub threads: Option<usize>,
    pub tile_size: Option<u32>,
    pub background: Option<[f32; 3]>,
    pub russian_roulette: Option<bool>,
    pub tone_map: Option<bool>,
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged(&self, other: &RenderSettings) -> RenderSettings {
        RenderSettings {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            samples_per_pixel: other.samples_per_pixel.or(self.samples_per_pixel),
            max_depth: other.max_depth.or(self.max_depth),
            threads: other.threads.or(self.threads),
            tile_size: other.tile_size.or(self.tile_size),
            background: other.background.or(self.background),
            russian_roulette: other.russian_roulette.or(self.russian_roulette),
            tone_map: other.tone_map.or(self.tone_map),
            seed: other.seed.or(self.seed),
        }
    }
}

/// A complete scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub camera: CameraDesc,

    #[serde(default)]
    pub render: RenderSettings,

    pub materials: Vec<MaterialDesc>,

    pub primitives: Vec<PrimitiveDesc>,
}

impl SceneDescription {
    /// Create an empty scene description with the default camera.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material definition.
    pub fn add_material(&mut self, material: MaterialDesc) {
        self.materials.push(material);
    }

    /// Add a primitive bound to the named material.
    pub fn add_primitive(&mut self, shape: ShapeDesc, material: impl Into<String>) {
        self.primitives.push(PrimitiveDesc {
            shape,
            material: material.into(),
        });
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDesc> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Get primitive count.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let mut scene = SceneDescription::new("test");
        scene.add_material(MaterialDesc::new("white", BxdfDesc::Lambertian));
        scene.add_primitive(
            ShapeDesc::Sphere {
                center: [0.0, 0.0, 3.0],
                radius: 1.0,
            },
            "white",
        );

        assert_eq!(scene.primitive_count(), 1);
        assert!(scene.material("white").is_some());
        assert!(scene.material("black").is_none());
        assert_eq!(scene.camera, CameraDesc::default());
    }

    #[test]
    fn test_material_builders() {
        let light = MaterialDesc::new("light", BxdfDesc::Lambertian)
            .with_albedo(Vec3::ZERO)
            .with_emission(Vec3::splat(4.0))
            .with_ior(1.33);

        assert!(light.is_emissive());
        assert_eq!(light.albedo, [0.0; 3]);
        assert_eq!(light.ior, 1.33);
        assert!(!MaterialDesc::new("dull", BxdfDesc::Lambertian).is_emissive());
    }

    #[test]
    fn test_settings_merge_prefers_overlay() {
        let file = RenderSettings {
            width: Some(640),
            height: Some(480),
            samples_per_pixel: Some(16),
            ..Default::default()
        };
        let cli = RenderSettings {
            samples_per_pixel: Some(4),
            seed: Some(9),
            ..Default::default()
        };

        let merged = file.merged(&cli);
        assert_eq!(merged.width, Some(640));
        assert_eq!(merged.height, Some(480));
        assert_eq!(merged.samples_per_pixel, Some(4));
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.max_depth, None);
    }
}
