// Re-export glam for convenience
pub use glam::*;

// Luma math types
mod ray;
pub mod sampling;

pub use ray::Ray;
pub use sampling::{gen_f32, random_hemisphere_vector, random_unit_vector, reflect};
