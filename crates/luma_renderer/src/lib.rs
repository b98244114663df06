//! Luma renderer - CPU Monte Carlo path tracing
//!
//! Unidirectional path tracing from the camera with Russian-roulette path
//! termination, rendered tile by tile on a fixed pool of worker threads.
//!
//! Pipeline: [`Scene`] (primitives + materials) → [`Camera`] rays →
//! [`Integrator`] radiance estimates → [`RenderSession`] tiles → [`Film`].

mod camera;
mod error;
mod film;
mod hittable;
mod integrator;
mod material;
mod output;
mod plane;
mod queue;
mod renderer;
mod scene;
mod sphere;
mod tile;
pub mod tonemap;
mod triangle;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use film::Film;
pub use hittable::{
    HitKind, Interaction, Primitive, PrimitiveId, Shape, ShapeHit, SurfacePoint, HIT_EPSILON,
};
pub use integrator::{Integrator, DEFAULT_BACKGROUND, DEFAULT_MAX_DEPTH};
pub use material::{fresnel, Bxdf, Color, Material, AIR_IOR};
pub use output::{save_image, save_png, write_raw_rgb};
pub use plane::Plane;
pub use queue::{Progress, TaskQueue};
pub use renderer::{render, render_pixel, ImageBuffer, RenderConfig, RenderSession};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tile::{generate_tiles, Tile, DEFAULT_TILE_SIZE};
pub use tonemap::filmic_tone_map;
pub use triangle::Triangle;

/// Re-export the math types the renderer API is written in.
pub use luma_math::{Ray, Vec2, Vec3};
