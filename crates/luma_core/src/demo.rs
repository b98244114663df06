//! Built-in demo scene.
//!
//! A dome of small spheres floating over a mirror floor, lit only by the
//! ambient background. Half of the spheres are diffuse white, the rest are
//! red mirrors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use luma_math::{random_unit_vector, Vec3};

use crate::scene::{BxdfDesc, MaterialDesc, SceneDescription, ShapeDesc};

/// Number of spheres in the demo dome.
pub const DEMO_SPHERE_COUNT: usize = 100;

impl SceneDescription {
    /// Build the demo scene. The same seed always yields the same layout.
    pub fn demo(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scene = SceneDescription::new("demo");

        scene.add_material(MaterialDesc::new("diffuse_white", BxdfDesc::Lambertian));
        scene.add_material(
            MaterialDesc::new("red_mirror", BxdfDesc::Specular { rho: 0.1 })
                .with_albedo(Vec3::new(1.0, 0.0, 0.0)),
        );

        scene.add_primitive(
            ShapeDesc::Plane {
                normal: [0.0, 1.0, 0.0],
                distance: -1.0,
            },
            "red_mirror",
        );

        let dome_center = Vec3::new(0.0, 0.0, 4.0);
        for _ in 0..DEMO_SPHERE_COUNT {
            // Upper hemisphere only
            let mut u = random_unit_vector(&mut rng);
            if u.y < 0.0 {
                u.y = -u.y;
            }

            let radius = rng.gen::<f32>() * 0.25 + 0.25;
            let material = if rng.gen_bool(0.5) {
                "diffuse_white"
            } else {
                "red_mirror"
            };

            scene.add_primitive(
                ShapeDesc::Sphere {
                    center: (dome_center + u * 3.0).to_array(),
                    radius,
                },
                material,
            );
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_layout() {
        let scene = SceneDescription::demo(1);

        assert_eq!(scene.primitive_count(), DEMO_SPHERE_COUNT + 1);
        assert_eq!(scene.materials.len(), 2);

        for primitive in &scene.primitives {
            assert!(scene.material(&primitive.material).is_some());
            if let ShapeDesc::Sphere { center, radius } = primitive.shape {
                assert!((0.25..0.5).contains(&radius));
                assert!(center[1] >= 0.0, "sphere below the dome: {center:?}");
                let offset = Vec3::from(center) - Vec3::new(0.0, 0.0, 4.0);
                assert!((offset.length() - 3.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_demo_is_deterministic() {
        assert_eq!(SceneDescription::demo(42), SceneDescription::demo(42));
        assert_ne!(SceneDescription::demo(42), SceneDescription::demo(43));
    }
}
