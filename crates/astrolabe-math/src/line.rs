//! Great-circle segment helpers used when drawing constellation lines.

use glam::{DQuat, DVec3};

use crate::smoothstep;

/// Shorten a great-circle segment so that it stops short of both endpoints.
///
/// `a0` and `a1` are the angles (radians) removed at `a` and `b`. Each
/// endpoint is rotated toward the other around `a × b`. Coincident or
/// antipodal endpoints are returned unchanged.
pub fn truncate_line(a: DVec3, b: DVec3, a0: f64, a1: f64) -> (DVec3, DVec3) {
    let axis = a.cross(b);
    if axis.length_squared() == 0.0 {
        return (a, b);
    }
    let axis = axis.normalize();
    let a = DQuat::from_axis_angle(axis, a0) * a;
    let b = DQuat::from_axis_angle(axis, -a1) * b;
    (a, b)
}

/// Growing-line effect: returns the new end point, interpolated from `a`
/// toward `b` with a smoothed progress `k` in `[0, 1]`.
pub fn grow_line(a: DVec3, b: DVec3, k: f64) -> DVec3 {
    let k = smoothstep(0.0, 1.0, k);
    a.lerp(b, k).normalize_or_zero()
}
