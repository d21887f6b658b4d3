//! Spherical caps: a centre direction plus the cosine of the half-angle.

use glam::{DMat3, DVec3};

/// A bounding region on the unit sphere.
///
/// Points `p` with `dot(center, normalize(p)) >= cos_radius` are inside.
/// A cap with `cos_radius == 1` covers a single direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cap {
    /// Unit centre direction.
    pub center: DVec3,
    /// Cosine of the angular radius.
    pub cos_radius: f64,
}

impl Cap {
    /// Create a cap from a centre direction (normalized here) and a cosine.
    pub fn new(center: DVec3, cos_radius: f64) -> Self {
        Self {
            center: center.normalize_or_zero(),
            cos_radius,
        }
    }

    /// Create a zero-size cap at `center`.
    pub fn point(center: DVec3) -> Self {
        Self::new(center, 1.0)
    }

    /// Create a cap from a centre and an angular radius in radians.
    pub fn from_angle(center: DVec3, radius: f64) -> Self {
        Self::new(center, radius.cos())
    }

    /// Angular radius in radians.
    pub fn radius(&self) -> f64 {
        self.cos_radius.clamp(-1.0, 1.0).acos()
    }

    /// Whether the cap covers a single direction.
    pub fn is_degenerate(&self) -> bool {
        self.cos_radius >= 1.0
    }

    /// Grow the cap so that it includes `p`, without moving its centre.
    ///
    /// Returns `true` if the radius changed. The resulting cap is a
    /// conservative bound, not the minimal one.
    pub fn extend(&mut self, p: DVec3) -> bool {
        let n = p.normalize_or_zero();
        let old = self.cos_radius;
        self.cos_radius = old.min(self.center.dot(n));
        self.cos_radius != old
    }

    /// Whether the direction `p` lies inside the cap.
    pub fn contains_point(&self, p: DVec3) -> bool {
        self.center.dot(p.normalize_or_zero()) >= self.cos_radius
    }

    /// Whether `other` lies entirely inside this cap.
    pub fn contains_cap(&self, other: &Cap) -> bool {
        let d = self.center.dot(other.center).clamp(-1.0, 1.0).acos();
        d + other.radius() <= self.radius()
    }
}

/// Bounding cap of a unit-square image mapped to the sky by `mat`.
///
/// The cap is centred on the image centre (UV `0.5, 0.5`) and extended to
/// the four corners.
pub fn compute_image_cap(mat: &DMat3) -> Cap {
    let mut cap = Cap::point(*mat * DVec3::new(0.5, 0.5, 1.0));
    for i in 0..4 {
        let uv = DVec3::new((i / 2) as f64, (i % 2) as f64, 1.0);
        cap.extend(*mat * uv);
    }
    cap
}
