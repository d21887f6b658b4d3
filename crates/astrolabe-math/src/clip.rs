//! Clip-space polygon rejection with screen margins.

use glam::DVec4;

/// One of the six clip-space half-spaces, in `left, right, bottom, top,
/// near, far` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// `x >= -w`.
    Left,
    /// `x <= w`.
    Right,
    /// `y >= -w`.
    Bottom,
    /// `y <= w`.
    Top,
    /// `z >= -w`.
    Near,
    /// `z <= w`.
    Far,
}

impl ClipPlane {
    /// All planes in evaluation order.
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Plane equation with the side margins applied (NDC units).
    ///
    /// A point `p` is on the visible side when `equation · p <= 0`.
    pub fn equation(self, margin_x: f64, margin_y: f64) -> DVec4 {
        match self {
            ClipPlane::Left => DVec4::new(-1.0, 0.0, 0.0, -1.0 + margin_x),
            ClipPlane::Right => DVec4::new(1.0, 0.0, 0.0, -1.0 + margin_x),
            ClipPlane::Bottom => DVec4::new(0.0, -1.0, 0.0, -1.0 + margin_y),
            ClipPlane::Top => DVec4::new(0.0, 1.0, 0.0, -1.0 + margin_y),
            ClipPlane::Near => DVec4::new(0.0, 0.0, -1.0, -1.0),
            ClipPlane::Far => DVec4::new(0.0, 0.0, 1.0, -1.0),
        }
    }
}

/// Test whether a shape given in homogeneous clip coordinates is entirely
/// outside the view.
///
/// Returns `true` only when every point lies outside one shared plane. This
/// never rejects a shape that is partly visible, but can keep a shape whose
/// points straddle several planes without entering the view.
pub fn is_clipped(points: &[DVec4], margin_x: f64, margin_y: f64) -> bool {
    ClipPlane::ALL.iter().any(|plane| {
        let eq = plane.equation(margin_x, margin_y);
        points.iter().all(|p| eq.dot(*p) > 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> DVec4 {
        DVec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_inside_polygon_not_clipped() {
        let quad = [p(-0.5, -0.5), p(0.5, -0.5), p(0.5, 0.5), p(-0.5, 0.5)];
        assert!(!is_clipped(&quad, 0.0, 0.0));
        assert!(!is_clipped(&quad, 0.4, 0.4));
    }

    #[test]
    fn test_all_outside_shared_plane_is_clipped() {
        let right = [p(1.5, -0.5), p(2.0, 0.5), p(1.1, 3.0)];
        assert!(is_clipped(&right, 0.0, 0.0));
        let below = [p(-3.0, -1.2), p(3.0, -1.5)];
        assert!(is_clipped(&below, 0.0, 0.0));
    }

    #[test]
    fn test_straddling_polygon_is_kept() {
        // One point on each side of the view, none shares an outside plane.
        let line = [p(-2.0, 0.0), p(2.0, 0.0)];
        assert!(!is_clipped(&line, 0.0, 0.0));
    }

    #[test]
    fn test_margin_shrinks_accepted_region() {
        let near_edge = [p(0.95, 0.0), p(0.97, 0.1)];
        assert!(!is_clipped(&near_edge, 0.0, 0.0));
        assert!(is_clipped(&near_edge, 0.2, 0.2));
    }

    #[test]
    fn test_behind_camera_is_clipped() {
        let behind = [DVec4::new(0.0, 0.0, -2.0, 1.0), DVec4::new(0.1, 0.0, -3.0, 1.0)];
        assert!(is_clipped(&behind, 0.0, 0.0));
    }

    #[test]
    fn test_empty_shape_is_clipped() {
        assert!(is_clipped(&[], 0.0, 0.0));
    }
}
