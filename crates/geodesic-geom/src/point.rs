//! Coordinate value types and conversions to the `geo` ecosystem
//!
//! `LatLng` is deliberately a plain two-field value. Longitudes are not
//! wrapped: `lng` and `lng + 360k` name the same place, and callers use the
//! shifted form to express the winding of a path.

use geo::{Coord, Point};

/// A geographic position in degrees
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Ordered points of one path
pub type LineString = Vec<LatLng>;

/// Ordered collection of independent paths
pub type MultiLineString = Vec<LineString>;

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Same point with the longitude moved by `degrees`
    #[inline]
    pub fn shifted(self, degrees: f64) -> Self {
        Self {
            lat: self.lat,
            lng: self.lng + degrees,
        }
    }

    /// Both coordinates are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    /// Interprets the tuple as `(lat, lng)`
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    /// Interprets the array as `[lat, lng]`
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

// `geo` stores x = longitude, y = latitude.

impl From<LatLng> for Coord<f64> {
    fn from(p: LatLng) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(p: LatLng) -> Self {
        Point::new(p.lng, p.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(p: Point<f64>) -> Self {
        Self {
            lat: p.y(),
            lng: p.x(),
        }
    }
}

/// Convert one path into a `geo::LineString`
pub fn to_geo_line_string(line: &[LatLng]) -> geo::LineString<f64> {
    line.iter().copied().map(Coord::from).collect()
}

/// Convert a set of paths into a `geo::MultiLineString`
pub fn to_geo_multi_line_string(lines: &[LineString]) -> geo::MultiLineString<f64> {
    geo::MultiLineString::new(lines.iter().map(|l| to_geo_line_string(l)).collect())
}

/// Convert a `geo::LineString` back into engine points
pub fn from_geo_line_string(line: &geo::LineString<f64>) -> LineString {
    line.coords().copied().map(LatLng::from).collect()
}
