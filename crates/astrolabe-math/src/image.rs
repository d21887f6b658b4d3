//! UV to sky transforms for illustrations anchored on three stars.

use glam::{DMat3, DVec2, DVec3};
use thiserror::Error;

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Errors from geometric solves.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The three anchor UVs are collinear (or coincident).
    #[error("anchor matrix is singular (det = {0:e})")]
    SingularMatrix(f64),
}

/// Solve the matrix `M` such that `M · (u, v, 1) = dir` for the three
/// anchor correspondences.
///
/// The sky directions are normalized before solving.
pub fn image_transform(uvs: [DVec2; 3], dirs: [DVec3; 3]) -> Result<DMat3, GeometryError> {
    let uv = DMat3::from_cols(uvs[0].extend(1.0), uvs[1].extend(1.0), uvs[2].extend(1.0));
    let det = uv.determinant();
    if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
        return Err(GeometryError::SingularMatrix(det));
    }
    let pos = DMat3::from_cols(
        dirs[0].normalize_or_zero(),
        dirs[1].normalize_or_zero(),
        dirs[2].normalize_or_zero(),
    );
    Ok(pos * uv.inverse())
}

/// Map a UV coordinate onto the unit sphere through an image transform.
pub fn apply_image_transform(mat: &DMat3, uv: DVec2) -> DVec3 {
    (*mat * uv.extend(1.0)).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_spherical;

    #[test]
    fn test_round_trip_reproduces_anchor_directions() {
        let uvs = [DVec2::new(0.1, 0.2), DVec2::new(0.9, 0.3), DVec2::new(0.4, 0.85)];
        let dirs = [
            from_spherical(1.20, 0.10),
            from_spherical(1.35, 0.12),
            from_spherical(1.28, 0.30),
        ];
        let mat = image_transform(uvs, dirs).unwrap();
        for (uv, dir) in uvs.iter().zip(dirs.iter()) {
            let got = apply_image_transform(&mat, *uv);
            assert!((got - *dir).length() < 1e-9, "got {got:?}, want {dir:?}");
        }
    }

    #[test]
    fn test_collinear_anchors_are_singular() {
        let uvs = [DVec2::new(0.0, 0.0), DVec2::new(0.5, 0.5), DVec2::new(1.0, 1.0)];
        let dirs = [DVec3::X, DVec3::Y, DVec3::Z];
        assert!(matches!(
            image_transform(uvs, dirs),
            Err(GeometryError::SingularMatrix(_))
        ));
    }

    #[test]
    fn test_coincident_anchors_are_singular() {
        let uv = DVec2::new(0.3, 0.3);
        assert!(image_transform([uv, uv, uv], [DVec3::X, DVec3::Y, DVec3::Z]).is_err());
    }
}
