//! Materials: reflectance models and Fresnel reflectance.

use luma_math::{random_hemisphere_vector, reflect, Vec3};
use rand::RngCore;
use std::f32::consts::FRAC_1_PI;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Refractive index of the medium camera rays start in.
pub const AIR_IOR: f32 = 1.0;

/// Reflectance model of a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bxdf {
    /// Ideal diffuse reflector.
    Lambertian,

    /// Ideal mirror. `rho` is a fixed reflectance weight, independent of
    /// angle, so a value below one models a partially absorbing mirror.
    Specular { rho: f32 },

    /// Glossy surface that picks a mirror or a diffuse lobe per bounce and
    /// weights it with the Fresnel reflectance. `roughness` is the
    /// probability of the diffuse lobe.
    Dielectric { roughness: f32 },
}

/// A material shared by every primitive and thread that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    bxdf: Bxdf,
    albedo: Color,
    transmission: Color,
    ior: f32,
    emission: Color,
}

impl Material {
    /// Create a new material with no emission and no transmission.
    pub fn new(bxdf: Bxdf, albedo: Color, ior: f32) -> Self {
        Self {
            bxdf,
            albedo,
            transmission: Color::ZERO,
            ior,
            emission: Color::ZERO,
        }
    }

    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Self::new(Bxdf::Lambertian, albedo, AIR_IOR)
    }

    /// Create a mirror material.
    ///
    /// - `albedo`: tint of the reflection
    /// - `rho`: fixed reflectance weight
    pub fn specular(albedo: Color, rho: f32) -> Self {
        Self::new(Bxdf::Specular { rho }, albedo, AIR_IOR)
    }

    /// Create a Fresnel-blended glossy material.
    ///
    /// - `roughness`: probability of scattering diffusely, 0 = always mirror
    /// - `ior`: index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn dielectric(albedo: Color, roughness: f32, ior: f32) -> Self {
        Self::new(
            Bxdf::Dielectric {
                roughness: roughness.clamp(0.0, 1.0),
            },
            albedo,
            ior,
        )
    }

    /// Set emitted radiance.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set transmission color.
    pub fn with_transmission(mut self, transmission: Color) -> Self {
        self.transmission = transmission;
        self
    }

    pub fn bxdf(&self) -> Bxdf {
        self.bxdf
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn transmission(&self) -> Color {
        self.transmission
    }

    /// Color response of the surface.
    #[inline]
    pub fn f(&self) -> Color {
        self.albedo
    }

    /// Whether sampling needs a Fresnel coefficient.
    pub fn uses_fresnel(&self) -> bool {
        matches!(self.bxdf, Bxdf::Dielectric { .. })
    }

    /// Sample an outgoing direction.
    ///
    /// `u` is the lobe-selection draw; pass the same value to
    /// [`Material::weight`] so both pick the same lobe.
    pub fn sample(
        &self,
        u: f32,
        _fresnel: f32,
        incoming: Vec3,
        normal: Vec3,
        rng: &mut dyn RngCore,
    ) -> Vec3 {
        match self.bxdf {
            Bxdf::Lambertian => random_hemisphere_vector(normal, rng),
            Bxdf::Specular { .. } => reflect(incoming, normal),
            Bxdf::Dielectric { roughness } => {
                if u >= roughness {
                    reflect(incoming, normal)
                } else {
                    random_hemisphere_vector(normal, rng)
                }
            }
        }
    }

    /// Directional weight of a sampled outgoing direction.
    pub fn weight(&self, u: f32, fresnel: f32, normal: Vec3, outgoing: Vec3) -> f32 {
        let cos = normal.dot(outgoing).max(0.0);
        match self.bxdf {
            Bxdf::Lambertian => FRAC_1_PI * cos,
            Bxdf::Specular { rho } => rho,
            Bxdf::Dielectric { roughness } => {
                if u >= roughness {
                    (1.0 - fresnel) + fresnel * cos
                } else {
                    FRAC_1_PI * cos * fresnel
                }
            }
        }
    }
}

/// Unpolarized Fresnel reflectance at a dielectric boundary.
///
/// `cos_i` is the cosine between the reversed incoming direction and the
/// surface normal; negative values mean the ray is leaving the medium with
/// index `eta_t`, in which case the indices are swapped.
pub fn fresnel(cos_i: f32, eta_i: f32, eta_t: f32) -> f32 {
    let mut cos_i = cos_i.clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t) = (eta_i, eta_t);
    if cos_i < 0.0 {
        std::mem::swap(&mut eta_i, &mut eta_t);
        cos_i = -cos_i;
    }

    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    // Past the critical angle sin_t would exceed one: total internal reflection
    let sin_t = (eta_i / eta_t * sin_i).min(1.0);
    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();

    let parallel_den = eta_t * cos_i + eta_i * cos_t;
    let perpendicular_den = eta_i * cos_i + eta_t * cos_t;
    if !(parallel_den > 0.0 && perpendicular_den > 0.0) {
        return 1.0;
    }

    let r_parallel = (eta_t * cos_i - eta_i * cos_t) / parallel_den;
    let r_perpendicular = (eta_i * cos_i - eta_t * cos_t) / perpendicular_den;

    0.5 * (r_parallel * r_parallel + r_perpendicular * r_perpendicular)
}
