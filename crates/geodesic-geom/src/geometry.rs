//! GeodesicGeometry - Line building over a held configuration
//!
//! This module provides the high-level API: waypoint sequences go in,
//! subdivided great-circle paths come out, and the splitting and statistics
//! helpers are exposed alongside so that callers need only one value.

use crate::{LatLng, LineString, MultiLineString, Result, Statistics, distance, sphere, split, stats};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for geodesic line construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Split rendered paths at the antimeridian (default true).
    pub wrap: bool,
    /// Recursion depth of the midpoint subdivision (default 3).
    /// Every segment between two waypoints becomes `2^(steps + 1)` line pieces.
    pub steps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap: true,
            steps: 3,
        }
    }
}

/// Geometry engine holding a [`Config`]
///
/// All operations take `&self`; the configuration can only be replaced
/// through `&mut self` between computations.
#[derive(Debug, Clone, Default)]
pub struct GeodesicGeometry {
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GeodesicGeometry {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration
    #[inline]
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Subdivision depth used by [`Self::line`]
    #[inline]
    pub fn steps(&self) -> u32 {
        self.config.steps
    }

    /// Ellipsoidal distance in meters
    #[inline]
    pub fn distance(&self, start: LatLng, dest: LatLng) -> f64 {
        distance::distance(start, dest)
    }

    /// Subdivide the arc between two points to the given depth
    #[inline]
    pub fn recursive_midpoint(&self, start: LatLng, dest: LatLng, depth: u32) -> Result<LineString> {
        sphere::recursive_midpoint(start, dest, depth)
    }

    /// Great-circle path between two points at the configured resolution
    #[inline]
    pub fn line(&self, start: LatLng, dest: LatLng) -> Result<LineString> {
        sphere::recursive_midpoint(start, dest, self.config.steps)
    }

    /// Great-circle path through a sequence of waypoints
    ///
    /// Joints between consecutive segments appear once. Fewer than two
    /// waypoints are returned unchanged.
    pub fn line_string(&self, points: &[LatLng]) -> Result<LineString> {
        if points.len() < 2 {
            return Ok(points.to_vec());
        }

        let per_segment = sphere::arc_len(self.config.steps).map_or(0, |n| n - 1);
        let mut result = Vec::with_capacity((points.len() - 1).saturating_mul(per_segment).saturating_add(1));
        for pair in points.windows(2) {
            let segment = self.line(pair[0], pair[1])?;
            // The first point of every segment is the previous segment's last
            let skip = usize::from(!result.is_empty());
            result.extend(segment.into_iter().skip(skip));
        }
        Ok(result)
    }

    /// Apply [`Self::line_string`] to every waypoint sequence, keeping their order
    pub fn multi_line_string(&self, lines: &[LineString]) -> Result<MultiLineString> {
        #[cfg(feature = "profiling")]
        profiling::scope!("geometry::multi_line_string");

        let result = lines
            .iter()
            .map(|line| self.line_string(line))
            .collect::<Result<MultiLineString>>()?;

        tracing::trace!(
            "Built {} geodesic lines with {} vertices at depth {}",
            result.len(),
            result.iter().map(Vec::len).sum::<usize>(),
            self.config.steps
        );
        Ok(result)
    }

    /// Split a single segment where it crosses the antimeridian
    #[inline]
    pub fn split_line(&self, start: LatLng, dest: LatLng) -> Vec<LineString> {
        split::split_line(start, dest)
    }

    /// Split every path where it crosses the antimeridian
    #[inline]
    pub fn split_multi_line_string(&self, lines: &[LineString]) -> MultiLineString {
        split::split_multi_line_string(lines)
    }

    /// Distance in meters along each path
    #[inline]
    pub fn multiline_distance(&self, lines: &[LineString]) -> Vec<f64> {
        stats::multiline_distance(lines)
    }

    /// Summarize raw waypoints and rendered vertices
    #[inline]
    pub fn update_statistics(&self, points: &[LineString], vertices: &[LineString]) -> Statistics {
        stats::update_statistics(points, vertices)
    }
}
