//! Antimeridian splitting for equirectangular rendering
//!
//! A flat map joins consecutive points with straight lines in longitude. A
//! segment whose shortest path crosses ±180° must therefore be cut in two,
//! with a boundary point inserted at -180 on one side and +180 on the other.

use crate::utils::{LNG_EPS, wrap_lng};
use crate::{LatLng, LineString, MultiLineString, distance, sphere};

/// Latitude of the reference point used to describe the antimeridian as a
/// great-circle path (the pole itself has no defined bearing)
const ANTIMERIDIAN_REFERENCE_LAT: f64 = 89.9;

/// Bearing of the antimeridian path from the reference point
const ANTIMERIDIAN_BEARING: f64 = 180.0;

/// Longitude wrapped into `[-180, 180]`, with the antimeridian itself
/// (within `LNG_EPS`) always expressed as `180`
fn canonical_lng(lng: f64) -> f64 {
    let wrapped = wrap_lng(lng);
    if on_antimeridian(wrapped) { 180.0 } else { wrapped }
}

#[inline]
fn on_antimeridian(lng: f64) -> bool {
    (lng.abs() - 180.0).abs() <= LNG_EPS
}

/// Split one segment where it crosses the antimeridian
///
/// Returns a single segment when no crossing occurs, otherwise two segments
/// joined at the crossing latitude. Longitudes in the output are canonical:
/// the result is the same for inputs shifted together by any multiple of 360°.
/// A start on the antimeridian is placed on the side of `dest` and never
/// causes a split.
pub fn split_line(start: LatLng, dest: LatLng) -> Vec<LineString> {
    let mut dest_lng = canonical_lng(dest.lng);
    let mut start_lng = canonical_lng(start.lng);
    if on_antimeridian(start_lng) && dest_lng < 0.0 {
        start_lng = -180.0;
    }
    if dest_lng - start_lng > 180.0 {
        dest_lng -= 360.0;
    } else if dest_lng - start_lng < -180.0 {
        dest_lng += 360.0;
    }
    let start = LatLng::new(start.lat, start_lng);
    let dest = LatLng::new(dest.lat, dest_lng);

    let boundary = if dest.lng < -180.0 - LNG_EPS {
        -180.0
    } else if dest.lng > 180.0 + LNG_EPS {
        180.0
    } else {
        return vec![vec![start, dest]];
    };

    match crossing_latitude(start, dest, boundary) {
        Some(lat) => {
            tracing::debug!("Segment {start} -> {dest} crosses the antimeridian at latitude {lat}");
            vec![
                vec![start, LatLng::new(lat, boundary)],
                vec![LatLng::new(lat, -boundary), dest.shifted(-2.0 * boundary)],
            ]
        }
        None => {
            // The path runs through the pole along a meridian, nothing to cut
            vec![vec![start, LatLng::new(dest.lat, canonical_lng(dest.lng))]]
        }
    }
}

/// Latitude at which the path from `start` towards `dest` meets the
/// meridian at `boundary` (±180)
fn crossing_latitude(start: LatLng, dest: LatLng, boundary: f64) -> Option<f64> {
    let bearing = distance::inverse(start, dest).initial_bearing;
    let antimeridian = LatLng::new(ANTIMERIDIAN_REFERENCE_LAT, boundary);
    sphere::intersection(start, bearing, antimeridian, ANTIMERIDIAN_BEARING).map(|p| p.lat)
}

/// Split every path of a MultiLineString at the antimeridian
///
/// Consecutive segments without a crossing are merged into one output path;
/// every crossing closes the current path and opens a new one. So does a
/// waypoint on the antimeridian that the next segment leaves on the other
/// side. Single points pass through unchanged and applying the function to
/// its own output is a no-op.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn split_multi_line_string(lines: &[LineString]) -> MultiLineString {
    let mut result = Vec::with_capacity(lines.len());

    for line in lines {
        if line.len() < 2 {
            result.push(line.clone());
            continue;
        }

        let mut open: LineString = Vec::with_capacity(line.len());
        for pair in line.windows(2) {
            let mut parts = split_line(pair[0], pair[1]).into_iter();
            if let Some(first) = parts.next() {
                // Same waypoint seen as +180 and -180
                let changes_side = match (open.last(), first.first()) {
                    (Some(last), Some(next)) => (last.lng - next.lng).abs() > 180.0,
                    _ => false,
                };
                if changes_side {
                    result.push(std::mem::replace(&mut open, first));
                } else {
                    // `first` starts with the canonical form of the open path's last point
                    open.pop();
                    open.extend(first);
                }
            }
            if let Some(second) = parts.next() {
                result.push(std::mem::replace(&mut open, second));
            }
        }
        result.push(open);
    }

    result
}
