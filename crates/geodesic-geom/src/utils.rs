//! Angle helpers and ellipsoid constants shared by the geometry modules

/// WGS84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS84 semi-minor axis in meters
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Tolerance in degrees used when classifying longitudes against ±180
pub const LNG_EPS: f64 = 1e-9;

/// Wrap a longitude into `[-180, 180]`
///
/// Values already inside `[-180 - LNG_EPS, 180 + LNG_EPS]` are returned
/// unchanged, so boundary points produced by a split keep their side.
#[inline]
pub fn wrap_lng(degrees: f64) -> f64 {
    if (-180.0 - LNG_EPS..=180.0 + LNG_EPS).contains(&degrees) {
        degrees
    } else {
        (degrees + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Reduce a longitude difference to the signed value in `(-180, 180]`
#[inline]
pub fn normalize_delta_lng(delta: f64) -> f64 {
    let reduced = delta.rem_euclid(360.0);
    if reduced > 180.0 { reduced - 360.0 } else { reduced }
}

/// Wrap a bearing into `[0, 360)`
#[inline]
pub fn wrap_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Geocentric unit vector of a position on the sphere
#[inline]
pub fn to_unit_vector(lat: f64, lng: f64) -> [f64; 3] {
    let (phi, lambda) = (lat.to_radians(), lng.to_radians());
    [
        phi.cos() * lambda.cos(),
        phi.cos() * lambda.sin(),
        phi.sin(),
    ]
}
