//! Scene file loading.
//!
//! Scene files are JSON documents matching [`SceneDescription`].

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// Load a scene description from a JSON file.
///
/// If the file does not name the scene, the file stem is used.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&source)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} materials, {} primitives",
        scene.name,
        path.display(),
        scene.materials.len(),
        scene.primitives.len()
    );

    Ok(scene)
}

/// Parse a scene description from a JSON string.
pub fn load_scene_from_str(source: &str) -> LoadResult<SceneDescription> {
    Ok(serde_json::from_str(source)?)
}
