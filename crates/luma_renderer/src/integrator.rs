//! Recursive path tracing integrator.
//!
//! Estimates incoming radiance along a ray with a random walk through the
//! scene. Each bounce samples one outgoing direction from the hit
//! material; paths end at the bounce limit, on escaping the scene, or by
//! Russian roulette, whose survival probability shrinks with the path's
//! accumulated throughput.

use crate::hittable::PrimitiveId;
use crate::material::{fresnel, AIR_IOR};
use crate::{Color, Ray, Scene};
use luma_math::gen_f32;
use rand::RngCore;
use std::f32::consts::PI;

/// Default background radiance for rays that leave the scene.
pub const DEFAULT_BACKGROUND: Color = Color::splat(PI);

/// Default bounce limit.
pub const DEFAULT_MAX_DEPTH: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    /// Paths are cut off at this many bounces
    pub max_depth: u32,
    /// Radiance returned for escaped or cut-off paths
    pub background: Color,
    /// When false every path survives until `max_depth`
    pub russian_roulette: bool,
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Integrator {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            background: DEFAULT_BACKGROUND,
            russian_roulette: true,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_russian_roulette(mut self, enabled: bool) -> Self {
        self.russian_roulette = enabled;
        self
    }

    /// Radiance arriving at the origin of a camera ray.
    pub fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.li(scene, ray, 1.0, AIR_IOR, 0, None, rng)
    }

    /// One step of the random walk.
    ///
    /// - `prr`: survival probability for this bounce
    /// - `eta`: refractive index of the medium the ray travels in
    /// - `exclude`: primitive the ray leaves from, never reported as a hit
    #[allow(clippy::too_many_arguments)]
    pub fn li(
        &self,
        scene: &Scene,
        ray: &Ray,
        prr: f32,
        eta: f32,
        depth: u32,
        exclude: Option<PrimitiveId>,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth >= self.max_depth {
            return self.background;
        }

        let rec = scene.intersect(ray, exclude);
        let (Some(primitive), Some(surface)) = (rec.primitive(), rec.resolve()) else {
            return self.background;
        };
        let material = primitive.material();

        let mut radiance = material.emission();

        let prr = if self.russian_roulette { prr } else { 1.0 };
        if gen_f32(rng) >= prr {
            return radiance;
        }

        let incoming = ray.direction();
        let reflectance = if material.uses_fresnel() {
            fresnel(-incoming.dot(surface.normal), eta, material.ior())
        } else {
            1.0
        };

        let u = gen_f32(rng);
        let outgoing = material.sample(u, reflectance, incoming, surface.normal, rng);
        let weight = material.weight(u, reflectance, surface.normal, outgoing);
        let f = material.f();

        let next_prr = (prr * weight * f.max_element()).clamp(0.0, 1.0);
        let next = Ray::new(surface.position, outgoing);
        let incoming_radiance = self.li(
            scene,
            &next,
            next_prr,
            eta,
            depth + 1,
            rec.primitive_id(),
            rng,
        );

        radiance += f * incoming_radiance * (weight / prr);
        radiance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use luma_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn mirror(rho: f32, emission: f32) -> Arc<Material> {
        Arc::new(Material::specular(Color::ONE, rho).with_emission(Color::splat(emission)))
    }

    /// Mirror facing the origin at z = 2 and a second mirror facing it at
    /// z = -1; a ray along +Z bounces between them until cut off.
    fn facing_mirrors() -> Scene {
        let mut scene = Scene::new();
        scene.add(Plane::new(-Vec3::Z, -2.0), mirror(0.5, 1.0));
        scene.add(Plane::new(Vec3::Z, -1.0), mirror(0.5, 1.0));
        scene
    }

    fn mean(samples: usize, mut f: impl FnMut() -> Color) -> Color {
        let mut sum = Color::ZERO;
        for _ in 0..samples {
            sum += f();
        }
        sum / samples as f32
    }

    #[test]
    fn test_depth_limit_returns_background() {
        let scene = facing_mirrors();
        let integrator = Integrator::new(4).with_background(Color::new(0.1, 0.2, 0.3));
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        for depth in [4, 5, 100] {
            let l = integrator.li(&scene, &ray, 1.0, AIR_IOR, depth, None, &mut rng);
            assert_eq!(l, Color::new(0.1, 0.2, 0.3));
        }
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = facing_mirrors();
        let integrator = Integrator::default();
        let mut rng = StdRng::seed_from_u64(1);

        let l = integrator.radiance(&scene, &Ray::new(Vec3::ZERO, Vec3::X), &mut rng);
        assert_eq!(l, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_bounded_mirror_path_without_roulette() {
        // L = e + rho * L' at each of 4 bounces, then background:
        // 1 + .5 (1 + .5 (1 + .5 (1 + .5 * 1))) = 1.9375
        let scene = facing_mirrors();
        let integrator = Integrator::new(4)
            .with_background(Color::ONE)
            .with_russian_roulette(false);
        let mut rng = StdRng::seed_from_u64(3);

        let l = integrator.radiance(&scene, &Ray::new(Vec3::ZERO, Vec3::Z), &mut rng);
        assert!((l - Color::splat(1.9375)).abs().max_element() < 1e-5, "{l:?}");
    }

    #[test]
    fn test_roulette_is_unbiased_on_mirror_path() {
        let scene = facing_mirrors();
        let integrator = Integrator::new(4).with_background(Color::ONE);
        let mut rng = StdRng::seed_from_u64(17);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let estimate = mean(50_000, || integrator.radiance(&scene, &ray, &mut rng));
        assert!((estimate - Color::splat(1.9375)).abs().max_element() < 0.05, "{estimate:?}");
    }

    #[test]
    fn test_roulette_compensates_survival_probability() {
        // Single mirror, reflected ray escapes: exact value is e + rho * B = 2
        let mut scene = Scene::new();
        scene.add(Plane::new(-Vec3::Z, -2.0), mirror(0.5, 1.0));
        let integrator = Integrator::new(6).with_background(Color::splat(2.0));
        let mut rng = StdRng::seed_from_u64(29);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let estimate = mean(20_000, || {
            integrator.li(&scene, &ray, 0.5, AIR_IOR, 0, None, &mut rng)
        });
        assert!((estimate - Color::splat(2.0)).abs().max_element() < 0.05, "{estimate:?}");

        let exact = integrator
            .with_russian_roulette(false)
            .li(&scene, &ray, 0.5, AIR_IOR, 0, None, &mut rng);
        assert!((exact - Color::splat(2.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_emissive_sphere_from_inside() {
        let emission = Color::new(2.0, 3.0, 0.5);
        let mut scene = Scene::new();
        scene.add(
            Sphere::new(Vec3::new(1.0, 2.0, 3.0), 1.5),
            Arc::new(Material::lambertian(Color::ZERO).with_emission(emission)),
        );
        let integrator = Integrator::default().with_background(Color::ZERO);
        let mut rng = StdRng::seed_from_u64(5);

        let mut random = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let dir = luma_math::random_unit_vector(&mut random);
            let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), dir);
            assert_eq!(integrator.radiance(&scene, &ray, &mut rng), emission);
        }
    }

    #[test]
    fn test_emissive_sphere_from_outside() {
        let emission = Color::new(2.0, 3.0, 0.5);
        let mut scene = Scene::new();
        scene.add(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 3.0),
            Arc::new(Material::lambertian(Color::ZERO).with_emission(emission)),
        );
        let integrator = Integrator::default().with_background(Color::ZERO);
        let mut rng = StdRng::seed_from_u64(21);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        for _ in 0..100 {
            assert_eq!(integrator.radiance(&scene, &ray, &mut rng), emission);
        }
    }

    #[test]
    fn test_mirror_at_normal_incidence_reflects_back() {
        let mut scene = Scene::new();
        scene.add(Plane::new(-Vec3::Z, -2.0), mirror(1.0, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rng = StdRng::seed_from_u64(8);

        let rec = scene.intersect(&ray, None);
        let surface = rec.resolve().unwrap();
        let material = rec.primitive().unwrap().material();
        let out = material.sample(0.5, 1.0, ray.direction(), surface.normal, &mut rng);

        let expected = ray.direction() - 2.0 * surface.normal.dot(ray.direction()) * surface.normal;
        assert!((out - expected).length() < 1e-6);
        assert!((out - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_dielectric_path_stays_finite() {
        let mut scene = Scene::new();
        let glossy = Arc::new(Material::dielectric(Color::splat(0.8), 0.4, 1.5));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0), glossy.clone());
        scene.add(Plane::new(Vec3::Y, -1.0), glossy);
        let integrator = Integrator::default();
        let mut rng = StdRng::seed_from_u64(13);

        for i in 0..500 {
            let x = (i % 20) as f32 / 10.0 - 1.0;
            let ray = Ray::normalized(Vec3::ZERO, Vec3::new(x, -0.3, 1.0));
            let l = integrator.radiance(&scene, &ray, &mut rng);
            assert!(l.is_finite() && l.min_element() >= 0.0, "{l:?}");
        }
    }
}
