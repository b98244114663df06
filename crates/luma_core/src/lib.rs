//! Luma Core - scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `MaterialDesc`,
//!   `ShapeDesc`, `CameraDesc`, `RenderSettings`
//! - **Loading**: JSON scene files via serde
//! - **Demo scene**: a seeded built-in scene for quick renders
//!
//! # Example
//!
//! ```ignore
//! use luma_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} primitives", scene.primitive_count());
//! ```

pub mod demo;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadResult, SceneError};
pub use scene::{
    BxdfDesc, CameraDesc, MaterialDesc, PrimitiveDesc, RenderSettings, SceneDescription, ShapeDesc,
};
