//! Random direction sampling and reflection helpers.
//!
//! All samplers take the caller's generator explicitly so each render
//! worker can own an independent stream.

use crate::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Uniform z in [-1, 1] and uniform azimuth give an area-uniform sample
    let z = 1.0 - 2.0 * gen_f32(rng);
    let phi = 2.0 * PI * gen_f32(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly distributed direction on the hemisphere around `normal`.
///
/// The result always satisfies `normal.dot(v) >= 0`.
pub fn random_hemisphere_vector(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let v = random_unit_vector(rng);
    if normal.dot(v) < 0.0 {
        -v
    } else {
        v
    }
}

/// Mirror `incoming` about a unit-length `normal`: `I - 2 (N.I) N`.
#[inline]
pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    incoming - normal * (2.0 * normal.dot(incoming))
}
