//! Renderer error type.

use thiserror::Error;

/// Errors that can occur while building a scene, rendering or saving.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Primitive {primitive} references unknown material '{material}'")]
    UnknownMaterial { primitive: usize, material: String },

    #[error("Material '{0}' is defined more than once")]
    DuplicateMaterial(String),

    #[error("Primitive {primitive} is a degenerate {shape}")]
    DegenerateShape { primitive: usize, shape: &'static str },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
