//! Great-circle operations on the unit sphere
//!
//! These drive rendering resolution, not metric accuracy, so a sphere is
//! enough. Longitudes of computed points are expressed relative to the first
//! input point and are never wrapped, which keeps a subdivided path
//! continuous in longitude.

use crate::utils::to_unit_vector;
use crate::{GeodesicError, LatLng, LineString, Result};
use std::f64::consts::PI;

/// Below this norm the summed unit vectors have no usable direction
const ANTIPODAL_NORM_EPS: f64 = 1e-10;

/// Great-circle midpoint between two points
///
/// Returns [`GeodesicError::AntipodalPoints`] when the points are antipodal and
/// the midpoint is undefined.
pub fn midpoint(start: LatLng, dest: LatLng) -> Result<LatLng> {
    // Place `start` on the prime meridian so the result is relative to it
    let a = to_unit_vector(start.lat, 0.0);
    let b = to_unit_vector(dest.lat, dest.lng - start.lng);
    let c = [a[0] + b[0], a[1] + b[1], a[2] + b[2]];

    let norm = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
    if norm < ANTIPODAL_NORM_EPS {
        return Err(GeodesicError::AntipodalPoints { start, end: dest });
    }

    let lat = c[2].atan2((c[0] * c[0] + c[1] * c[1]).sqrt());
    let lng = start.lng.to_radians() + c[1].atan2(c[0]);

    Ok(LatLng::new(lat.to_degrees(), lng.to_degrees()))
}

/// Approximate the great-circle arc from `start` to `dest` by recursive bisection
///
/// The result always has `2^(depth + 1) + 1` points, starting with `start`
/// and ending with `dest`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn recursive_midpoint(start: LatLng, dest: LatLng, depth: u32) -> Result<LineString> {
    let mut points = Vec::with_capacity(arc_len(depth).unwrap_or(0));
    points.push(start);
    subdivide(start, dest, depth, &mut points)?;
    Ok(points)
}

/// Number of points of an arc subdivided to `depth`, when it fits in `usize`
pub(crate) fn arc_len(depth: u32) -> Option<usize> {
    1usize
        .checked_shl(depth.saturating_add(1))
        .and_then(|n| n.checked_add(1))
}

/// Append every point after `start` on the subdivided arc
fn subdivide(start: LatLng, dest: LatLng, depth: u32, out: &mut LineString) -> Result<()> {
    let mid = midpoint(start, dest)?;
    if depth == 0 {
        out.push(mid);
        out.push(dest);
    } else {
        subdivide(start, mid, depth - 1, out)?;
        subdivide(mid, dest, depth - 1, out)?;
    }
    Ok(())
}

/// Intersection of two great-circle paths given by start point and bearing
///
/// Bearings are in degrees. Returns `None` when the paths coincide or the
/// intersection is ambiguous (the paths only meet behind one of the start
/// points). Coincident start points are returned as the intersection.
pub fn intersection(
    first: LatLng,
    first_bearing: f64,
    second: LatLng,
    second_bearing: f64,
) -> Option<LatLng> {
    let phi1 = first.lat.to_radians();
    let lambda1 = first.lng.to_radians();
    let phi2 = second.lat.to_radians();
    let lambda2 = second.lng.to_radians();
    let theta13 = first_bearing.to_radians();
    let theta23 = second_bearing.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = lambda2 - lambda1;

    // Angular distance between the two start points
    let delta12 = 2.0
        * ((d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
            .sqrt()
            .asin();
    if delta12.abs() < f64::EPSILON {
        return Some(first);
    }

    let cos_theta_a = (phi2.sin() - phi1.sin() * delta12.cos()) / (delta12.sin() * phi1.cos());
    let cos_theta_b = (phi1.sin() - phi2.sin() * delta12.cos()) / (delta12.sin() * phi2.cos());
    let theta_a = cos_theta_a.clamp(-1.0, 1.0).acos();
    let theta_b = cos_theta_b.clamp(-1.0, 1.0).acos();

    let (theta12, theta21) = if d_lambda.sin() > 0.0 {
        (theta_a, 2.0 * PI - theta_b)
    } else {
        (2.0 * PI - theta_a, theta_b)
    };

    let alpha1 = theta13 - theta12; // angle 2-1-3
    let alpha2 = theta21 - theta23; // angle 1-2-3

    if alpha1.sin() == 0.0 && alpha2.sin() == 0.0 {
        return None; // infinitely many intersections
    }
    if alpha1.sin() * alpha2.sin() < 0.0 {
        return None; // ambiguous
    }

    let cos_alpha3 = -alpha1.cos() * alpha2.cos() + alpha1.sin() * alpha2.sin() * delta12.cos();
    let delta13 = (delta12.sin() * alpha1.sin() * alpha2.sin())
        .atan2(alpha2.cos() + alpha1.cos() * cos_alpha3);

    let phi3 = (phi1.sin() * delta13.cos() + phi1.cos() * delta13.sin() * theta13.cos()).asin();
    let d_lambda13 = (theta13.sin() * delta13.sin() * phi1.cos())
        .atan2(delta13.cos() - phi1.sin() * phi3.sin());
    let lambda3 = lambda1 + d_lambda13;

    Some(LatLng::new(phi3.to_degrees(), lambda3.to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEATTLE: LatLng = LatLng::new(47.56, -122.33);
    const CAPETOWN: LatLng = LatLng::new(-33.94, 18.39);

    fn assert_close(actual: LatLng, expected: LatLng, eps: f64) {
        assert!(
            (actual.lat - expected.lat).abs() < eps && (actual.lng - expected.lng).abs() < eps,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_midpoint_seattle_capetown() {
        let mid = midpoint(SEATTLE, CAPETOWN).unwrap();
        assert_close(mid, LatLng::new(18.849527, -35.885828), 1e-6);
    }

    #[test]
    fn test_midpoint_on_equator() {
        let mid = midpoint(LatLng::new(0.0, 10.0), LatLng::new(0.0, 30.0)).unwrap();
        assert_close(mid, LatLng::new(0.0, 20.0), 1e-12);
    }

    #[test]
    fn test_midpoint_keeps_start_winding() {
        // Crossing the antimeridian westward leaves the midpoint below -180
        let mid = midpoint(LatLng::new(0.0, -170.0), LatLng::new(0.0, 170.0)).unwrap();
        assert_close(mid, LatLng::new(0.0, -180.0), 1e-9);

        let mid = midpoint(LatLng::new(0.0, -175.0), LatLng::new(0.0, 165.0)).unwrap();
        assert_close(mid, LatLng::new(0.0, -185.0), 1e-9);
    }

    #[test]
    fn test_midpoint_antipodal_is_error() {
        let result = midpoint(LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0));
        assert!(matches!(result, Err(GeodesicError::AntipodalPoints { .. })));

        let result = midpoint(LatLng::new(90.0, 0.0), LatLng::new(-90.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_midpoint_nan_propagates() {
        let mid = midpoint(LatLng::new(f64::NAN, 0.0), CAPETOWN).unwrap();
        assert!(mid.lat.is_nan());
    }

    #[test]
    fn test_recursive_midpoint_lengths() {
        for depth in 0..=10 {
            let line = recursive_midpoint(SEATTLE, CAPETOWN, depth).unwrap();
            assert_eq!(line.len(), (1 << (depth + 1)) + 1, "depth {depth}");
            assert_eq!(line[0], SEATTLE);
            assert_eq!(*line.last().unwrap(), CAPETOWN);
        }
    }

    #[test]
    fn test_arc_len_does_not_overflow() {
        assert_eq!(arc_len(0), Some(3));
        assert_eq!(arc_len(3), Some(17));
        assert_eq!(arc_len(62), Some((1usize << 63) + 1));
        assert_eq!(arc_len(63), None);
        assert_eq!(arc_len(u32::MAX), None);
    }

    #[test]
    fn test_recursive_midpoint_depth_zero() {
        let line = recursive_midpoint(SEATTLE, CAPETOWN, 0).unwrap();
        let expected = [SEATTLE, LatLng::new(18.849527, -35.885828), CAPETOWN];
        for (actual, expected) in line.into_iter().zip(expected) {
            assert_close(actual, expected, 1e-6);
        }
    }

    #[test]
    fn test_recursive_midpoint_depth_one() {
        let line = recursive_midpoint(SEATTLE, CAPETOWN, 1).unwrap();
        let expected = [
            SEATTLE,
            LatLng::new(41.580847, -70.162019),
            LatLng::new(18.849527, -35.885828),
            LatLng::new(-8.461111, -10.677708),
            CAPETOWN,
        ];
        for (actual, expected) in line.into_iter().zip(expected) {
            assert_close(actual, expected, 1e-6);
        }
    }

    #[test]
    fn test_recursive_midpoint_antipodal_is_error() {
        let result = recursive_midpoint(LatLng::new(10.0, 20.0), LatLng::new(-10.0, -160.0), 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_intersection_of_meridian_and_equator() {
        let p = intersection(LatLng::new(0.0, -10.0), 90.0, LatLng::new(45.0, 20.0), 180.0).unwrap();
        assert_close(p, LatLng::new(0.0, 20.0), 1e-9);
    }

    #[test]
    fn test_intersection_behind_start_is_none() {
        // Heading west from the equator never meets the meridian east of it ahead of both starts
        let p = intersection(LatLng::new(0.0, -10.0), 270.0, LatLng::new(45.0, 20.0), 180.0);
        assert!(p.is_none());
    }

    #[test]
    fn test_intersection_same_start() {
        let start = LatLng::new(12.0, 34.0);
        assert_eq!(intersection(start, 10.0, start, 200.0), Some(start));
    }
}
