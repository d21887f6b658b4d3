//! Spherical coordinates and fixed epoch rotations.

use glam::{DMat3, DVec3};

/// Rotation from the B1875.0 mean equator (IAU constellation boundaries) to
/// J2000, column-major.
pub const B1875_TO_J2000: DMat3 = DMat3::from_cols_array_2d(&[
    [0.999535020565168, 0.027962538774844, 0.012158909862936],
    [-0.027962067406873, 0.999608963139696, -0.000208799220464],
    [-0.012159993837296, -0.000131286124061, 0.999926055923052],
]);

/// Unit vector for a longitude/latitude pair in radians.
pub fn from_spherical(lon: f64, lat: f64) -> DVec3 {
    let (slon, clon) = lon.sin_cos();
    let (slat, clat) = lat.sin_cos();
    DVec3::new(clat * clon, clat * slon, slat)
}

/// Longitude in `[0, 2π)` and latitude of a direction.
pub fn to_spherical(v: DVec3) -> (f64, f64) {
    let lon = v.y.atan2(v.x).rem_euclid(std::f64::consts::TAU);
    let lat = v.z.atan2((v.x * v.x + v.y * v.y).sqrt());
    (lon, lat)
}
