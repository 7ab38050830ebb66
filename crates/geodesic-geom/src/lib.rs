//! Geodesic Geometry - Great-circle paths for equirectangular maps
//!
//! This library computes the geometry needed to draw geodesic lines on a flat
//! (±180° longitude) map: ellipsoidal distances, smooth great-circle polylines
//! built by recursive midpoint subdivision, and splitting of those polylines
//! where they cross the antimeridian or pass over a pole.
//!
//! # Architecture
//!
//! - **[`distance`]**: Vincenty inverse on the WGS84 ellipsoid
//! - **[`sphere`]**: Spherical midpoint, recursive subdivision and path intersection
//! - **[`GeodesicGeometry`]**: Line building, antimeridian splitting and statistics
//!   over a held [`Config`]
//! - **[`GeodesicLine`]**: Waypoint holder that keeps rendered geometry and
//!   [`Statistics`] up to date
//!
//! # Example
//!
//! ```
//! use geodesic_geom::{Config, GeodesicGeometry, LatLng};
//!
//! let geom = GeodesicGeometry::new(Config::default());
//! let seattle = LatLng::new(47.56, -122.33);
//! let tokyo = LatLng::new(35.47, 139.15);
//!
//! let arc = geom.line(seattle, tokyo).unwrap();
//! assert_eq!(arc.len(), 17);
//!
//! let rendered = geom.split_multi_line_string(&[arc]);
//! assert_eq!(rendered.len(), 2);
//! ```

pub mod distance;
mod geometry;
mod line;
mod point;
pub mod sphere;
mod split;
mod stats;
pub mod utils;

// Public API exports
pub use distance::GeodesicInverse;
pub use geometry::{Config, GeodesicGeometry};
pub use line::GeodesicLine;
pub use point::{
    LatLng, LineString, MultiLineString, from_geo_line_string, to_geo_line_string,
    to_geo_multi_line_string,
};
pub use split::{split_line, split_multi_line_string};
pub use stats::{Statistics, multiline_distance, update_statistics};

/// Error types for geodesic computations
#[derive(Debug, thiserror::Error)]
pub enum GeodesicError {
    #[error("Midpoint undefined for antipodal points {start} and {end}")]
    AntipodalPoints { start: LatLng, end: LatLng },
}

pub type Result<T> = std::result::Result<T, GeodesicError>;
