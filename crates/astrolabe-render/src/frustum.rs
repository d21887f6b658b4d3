//! View frustum tests for caps on the sky sphere.
//!
//! Everything on the sky is a direction, so only the four side planes of the
//! projection matter. They pass through the observer and are extracted from
//! the projection matrix with the Gribb-Hartmann method.

use glam::{DMat4, DVec3, DVec4};

use astrolabe_math::Cap;

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;

/// The four side planes of a sky projection, in view space.
#[derive(Clone, Debug)]
pub struct SkyFrustum {
    /// Inward unit normals: left, right, bottom, top.
    normals: [DVec3; 4],
}

impl SkyFrustum {
    /// Extract the side planes from a projection matrix.
    pub fn from_projection(proj: &DMat4) -> Self {
        let rows = [proj.row(0), proj.row(1), proj.row(2), proj.row(3)];

        let mut planes = [DVec4::ZERO; 4];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];

        let normals = planes.map(|plane| plane.truncate().normalize_or_zero());
        Self { normals }
    }

    /// Whether a cap given in view space is entirely outside the frustum.
    ///
    /// A cap is rejected when it lies fully behind one side plane. Caps of a
    /// hemisphere or larger are never rejected.
    pub fn is_cap_clipped(&self, cap: &Cap) -> bool {
        if cap.cos_radius <= 0.0 {
            return false;
        }
        let sin_radius = (1.0 - cap.cos_radius * cap.cos_radius).max(0.0).sqrt();
        self.normals
            .iter()
            .any(|n| n.dot(cap.center) < -sin_radius)
    }

    /// Whether a view-space direction is inside all four side planes.
    pub fn contains_direction(&self, dir: DVec3) -> bool {
        self.normals.iter().all(|n| n.dot(dir) >= 0.0)
    }
}
