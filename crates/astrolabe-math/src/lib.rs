//! Spherical geometry for the sky: bounding caps, clip-space tests, image
//! transforms, great-circle line helpers and faders.

mod cap;
mod clip;
mod fader;
mod image;
mod line;
mod sphere;

pub use cap::{Cap, compute_image_cap};
pub use clip::{ClipPlane, is_clipped};
pub use fader::Fader;
pub use image::{GeometryError, apply_image_transform, image_transform};
pub use line::{grow_line, truncate_line};
pub use sphere::{B1875_TO_J2000, from_spherical, to_spherical};

/// Hermite interpolation between `edge0` and `edge1`, clamped to `[0, 1]`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
