//! Distance and point-count statistics over built paths

use crate::{LineString, distance};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a set of geodesic lines
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    /// Distance in meters of every input line, in input order
    pub distance_array: Vec<f64>,
    /// Sum of `distance_array`
    pub total_distance: f64,
    /// Number of raw waypoints across all lines
    pub points: usize,
    /// Number of rendered vertices across all lines
    pub vertices: usize,
}

/// Ellipsoidal length of every line in meters
///
/// Lines with fewer than two points have length 0.
pub fn multiline_distance(lines: &[LineString]) -> Vec<f64> {
    lines
        .iter()
        .map(|line| {
            line.windows(2)
                .fold(0.0, |total, pair| total + distance::distance(pair[0], pair[1]))
        })
        .collect()
}

/// Build [`Statistics`] from raw waypoints and the rendered geometry
pub fn update_statistics(points: &[LineString], vertices: &[LineString]) -> Statistics {
    let distance_array = multiline_distance(points);
    let total_distance = distance_array.iter().fold(0.0, |total, d| total + d);

    Statistics {
        distance_array,
        total_distance,
        points: points.iter().map(Vec::len).sum(),
        vertices: vertices.iter().map(Vec::len).sum(),
    }
}
