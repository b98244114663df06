//! Display transform applied to finished pixels.

use crate::Color;

/// Display gamma.
pub const GAMMA: f32 = 2.2;

/// ACES filmic curve fit, applied per channel.
///
/// Negative input is clamped to zero; output is in [0, 1].
#[inline]
pub fn aces_film(x: f32) -> f32 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;

    let x = x.max(0.0);
    ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(0.0, 1.0)
}

/// Apply gamma correction (gamma = 2.2).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / GAMMA)
    } else {
        0.0
    }
}

/// Map linear radiance to display values: ACES fit, then gamma.
pub fn filmic_tone_map(color: Color) -> Color {
    Color::new(
        linear_to_gamma(aces_film(color.x)),
        linear_to_gamma(aces_film(color.y)),
        linear_to_gamma(aces_film(color.z)),
    )
}
