//! Ellipsoidal distances using the Vincenty inverse formula on WGS84
//!
//! The iteration solves for the longitude difference λ on the auxiliary
//! sphere. It converges quickly for ordinary inputs but can stall for nearly
//! antipodal points; in that case the last estimate is returned instead of an
//! error.

use crate::LatLng;
use crate::utils::{WGS84_A, WGS84_B, WGS84_F, normalize_delta_lng, wrap_bearing};
use std::f64::consts::PI;

/// Convergence threshold for successive λ values (radians)
const CONVERGENCE_THRESHOLD: f64 = 1e-12;

/// Upper bound on λ iterations
pub const MAX_ITERATIONS: usize = 1000;

/// Result of an inverse geodesic computation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicInverse {
    /// Length of the geodesic in meters
    pub distance: f64,
    /// Azimuth at the start point in degrees `[0, 360)`, NaN for coincident points
    pub initial_bearing: f64,
    /// Azimuth at the end point in degrees `[0, 360)`, NaN for coincident points
    pub final_bearing: f64,
    /// Number of λ iterations performed
    pub iterations: usize,
    /// Whether λ settled below the convergence threshold
    pub converged: bool,
}

/// Distance in meters between two points on the WGS84 ellipsoid
///
/// Longitudes may be shifted by any multiple of 360°.
#[inline]
pub fn distance(p1: LatLng, p2: LatLng) -> f64 {
    inverse(p1, p2).distance
}

/// Solve the inverse geodesic problem between two points
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn inverse(p1: LatLng, p2: LatLng) -> GeodesicInverse {
    let (a, b, f) = (WGS84_A, WGS84_B, WGS84_F);

    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    // Shifted longitudes must be reduced first, otherwise the iteration
    // starts on the wrong branch.
    let l = normalize_delta_lng(p2.lng - p1.lng).to_radians();

    // Reduced latitudes: tan U = (1 - f) tan φ
    let tan_u1 = (1.0 - f) * phi1.tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let tan_u2 = (1.0 - f) * phi2.tan();
    let cos_u2 = 1.0 / (1.0 + tan_u2 * tan_u2).sqrt();
    let sin_u2 = tan_u2 * cos_u2;

    let antipodal = l.abs() > PI / 2.0 || (phi2 - phi1).abs() > PI / 2.0;

    let mut lambda = l;
    let mut sin_lambda = lambda.sin();
    let mut cos_lambda = lambda.cos();
    let mut sigma = if antipodal { PI } else { 0.0 };
    let mut sin_sigma = 0.0;
    let mut cos_sigma = if antipodal { -1.0 } else { 1.0 };
    let mut sin_sq_sigma = 0.0;
    let mut cos_2sigma_m = 1.0;
    let mut cos_sq_alpha = 1.0;

    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_ITERATIONS {
        iterations += 1;
        sin_lambda = lambda.sin();
        cos_lambda = lambda.cos();
        let t = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        sin_sq_sigma = (cos_u2 * sin_lambda) * (cos_u2 * sin_lambda) + t * t;
        if sin_sq_sigma.abs() < f64::EPSILON {
            // Coincident or exactly antipodal points: keep σ from the seed
            converged = true;
            break;
        }
        sin_sigma = sin_sq_sigma.sqrt();
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos²α = 0
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        if (lambda - previous).abs() <= CONVERGENCE_THRESHOLD {
            converged = true;
            break;
        }
    }

    if !converged {
        tracing::warn!(
            "Vincenty inverse did not converge after {MAX_ITERATIONS} iterations between {p1} and {p2}, using last estimate"
        );
    }

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    let s = b * big_a * (sigma - delta_sigma);

    // sin²σ = 0 means the azimuth is meridional
    let (alpha1, alpha2) = if sin_sq_sigma.abs() < f64::EPSILON {
        (0.0, PI)
    } else {
        (
            (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda),
            (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda),
        )
    };

    let (initial_bearing, final_bearing) = if s.abs() < f64::EPSILON {
        (f64::NAN, f64::NAN)
    } else {
        (
            wrap_bearing(alpha1.to_degrees()),
            wrap_bearing(alpha2.to_degrees()),
        )
    };

    GeodesicInverse {
        distance: s,
        initial_bearing,
        final_bearing,
        iterations,
        converged,
    }
}
