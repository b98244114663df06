//! Pinhole camera for primary ray generation.

use crate::Ray;
use luma_core::CameraDesc;
use luma_math::{random_hemisphere_vector, Vec3};
use rand::RngCore;

/// Pinhole camera. Call [`Camera::initialize`] after changing any setting.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    jitter_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 1280,
            image_height: 800,
            look_from: Vec3::new(0.0, 0.0, -0.5),
            look_at: Vec3::new(0.0, 0.0, 1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            // Cached values (initialized to defaults)
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            jitter_radius: 0.0,
        }
    }

    /// Build a camera from its scene description.
    pub fn from_desc(desc: &CameraDesc) -> Self {
        Self::new()
            .with_position(
                Vec3::from(desc.position),
                Vec3::from(desc.look_at),
                Vec3::from(desc.up),
            )
            .with_fov(desc.vfov)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;

        // Viewport sits at unit distance in front of the eye
        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * (width / height);

        // Camera basis vectors
        self.w = (self.look_from - self.look_at).normalize_or_zero();
        self.u = self.vup.cross(self.w).normalize_or_zero();
        self.v = self.w.cross(self.u);

        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / width;
        self.pixel_delta_v = viewport_v / height;

        let viewport_upper_left = self.center - self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Half the pixel diagonal at unit distance
        self.jitter_radius = 0.5 * (self.pixel_delta_u + self.pixel_delta_v).length();
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Unit direction through the center of pixel (x, y).
    pub fn primary_direction(&self, x: u32, y: u32) -> Vec3 {
        let pixel_center =
            self.pixel00_loc + (x as f32) * self.pixel_delta_u + (y as f32) * self.pixel_delta_v;
        (pixel_center - self.center).normalize_or_zero()
    }

    /// Ray through the center of pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.center, self.primary_direction(x, y))
    }

    /// Ray through pixel (x, y), its direction perturbed by up to half a
    /// pixel diagonal.
    pub fn jittered_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let direction = self.primary_direction(x, y);
        let offset = random_hemisphere_vector(direction, rng) * self.jitter_radius;
        Ray::normalized(self.center, direction + offset)
    }

    /// Angular half-diagonal of one pixel.
    pub fn jitter_radius(&self) -> f32 {
        self.jitter_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
