//! GeodesicLine - Waypoints plus their rendered geodesic geometry
//!
//! This is the model behind a drawable geodesic polyline, without any
//! drawing code: it owns the raw waypoints, keeps the rendered paths and the
//! [`Statistics`] in sync with them, and hands the result to whatever map
//! library the host uses.

use crate::point::to_geo_multi_line_string;
use crate::{Config, GeodesicGeometry, LatLng, LineString, MultiLineString, Result, Statistics};

/// Raw waypoints with cached rendered geometry and statistics
#[derive(Debug, Clone, Default)]
pub struct GeodesicLine {
    geom: GeodesicGeometry,
    points: MultiLineString,
    rendered: MultiLineString,
    statistics: Statistics,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GeodesicLine {
    /// Create an empty line
    pub fn new(config: Config) -> Self {
        Self {
            geom: GeodesicGeometry::new(config),
            ..Self::default()
        }
    }

    /// Create a line from waypoint sequences
    pub fn with_lat_lngs(lines: MultiLineString, config: Config) -> Result<Self> {
        let mut line = Self::new(config);
        line.set_lat_lngs(lines)?;
        Ok(line)
    }

    /// Replace all waypoints and rebuild the geometry
    ///
    /// On error the line keeps its previous waypoints and geometry.
    pub fn set_lat_lngs(&mut self, lines: MultiLineString) -> Result<&mut Self> {
        let built = Self::build(&self.geom, &lines)?;
        self.points = lines;
        self.commit(built);
        Ok(self)
    }

    /// Append a waypoint to the first path and rebuild the geometry
    pub fn add_lat_lng(&mut self, point: LatLng) -> Result<&mut Self> {
        let mut points = self.points.clone();
        match points.first_mut() {
            Some(first) => first.push(point),
            None => points.push(vec![point]),
        }
        self.set_lat_lngs(points)
    }

    /// Replace the configuration and rebuild the geometry
    pub fn set_config(&mut self, config: Config) -> Result<&mut Self> {
        let geom = GeodesicGeometry::new(config);
        let built = Self::build(&geom, &self.points)?;
        self.geom = geom;
        self.commit(built);
        Ok(self)
    }

    /// Current configuration
    #[inline]
    pub fn config(&self) -> &Config {
        self.geom.config()
    }

    /// Raw waypoints as given by the caller
    #[inline]
    pub fn points(&self) -> &[LineString] {
        &self.points
    }

    /// Geometry ready for drawing (split at the antimeridian when `wrap` is set)
    #[inline]
    pub fn rendered(&self) -> &[LineString] {
        &self.rendered
    }

    /// Statistics of the last rebuild
    #[inline]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Ellipsoidal distance in meters between two positions
    #[inline]
    pub fn distance(&self, start: LatLng, dest: LatLng) -> f64 {
        self.geom.distance(start, dest)
    }

    /// Rendered geometry as a `geo::MultiLineString` (x = longitude)
    pub fn to_geo(&self) -> geo::MultiLineString<f64> {
        to_geo_multi_line_string(&self.rendered)
    }

    /// Rendered geometry and statistics for `points`
    ///
    /// Returns `None` until the first path has at least two waypoints.
    fn build(
        geom: &GeodesicGeometry,
        points: &[LineString],
    ) -> Result<Option<(MultiLineString, Statistics)>> {
        if !points.first().is_some_and(|first| first.len() >= 2) {
            return Ok(None);
        }

        let geodesic = geom.multi_line_string(points)?;
        let statistics = geom.update_statistics(points, &geodesic);
        let rendered = if geom.config().wrap {
            geom.split_multi_line_string(&geodesic)
        } else {
            geodesic
        };
        Ok(Some((rendered, statistics)))
    }

    fn commit(&mut self, built: Option<(MultiLineString, Statistics)>) {
        let Some((rendered, statistics)) = built else {
            return;
        };
        self.rendered = rendered;
        self.statistics = statistics;

        tracing::debug!(
            "Geodesic line rebuilt: {} paths, {} points, {} vertices, {:.3} m",
            self.rendered.len(),
            self.statistics.points,
            self.statistics.vertices,
            self.statistics.total_distance
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEATTLE: LatLng = LatLng::new(47.56, -122.33);
    const TOKYO: LatLng = LatLng::new(35.47, 139.15);
    const BERLIN: LatLng = LatLng::new(52.5, 13.35);

    #[test]
    fn test_new_is_empty() {
        let line = GeodesicLine::new(Config::default());
        assert!(line.points().is_empty());
        assert!(line.rendered().is_empty());
        assert_eq!(line.statistics(), &Statistics::default());
    }

    #[test]
    fn test_wrapped_line_is_split() {
        let line = GeodesicLine::with_lat_lngs(vec![vec![SEATTLE, TOKYO]], Config::default()).unwrap();
        assert_eq!(line.rendered().len(), 2);
        assert_eq!(line.statistics().points, 2);
        assert_eq!(line.statistics().vertices, 17);
        // The boundary point appears on both sides
        let rendered: usize = line.rendered().iter().map(Vec::len).sum();
        assert_eq!(rendered, 17 + 2);
    }

    #[test]
    fn test_unwrapped_line_is_not_split() {
        let config = Config {
            wrap: false,
            ..Config::default()
        };
        let line = GeodesicLine::with_lat_lngs(vec![vec![SEATTLE, TOKYO]], config).unwrap();
        assert_eq!(line.rendered().len(), 1);
        assert_eq!(line.rendered()[0].len(), 17);
    }

    #[test]
    fn test_add_lat_lng_builds_incrementally() {
        let mut line = GeodesicLine::new(Config::default());
        line.add_lat_lng(BERLIN).unwrap();
        assert_eq!(line.points(), &[vec![BERLIN]]);
        assert!(line.rendered().is_empty());

        line.add_lat_lng(SEATTLE).unwrap();
        assert_eq!(line.rendered().len(), 1);
        assert_eq!(line.rendered()[0].len(), 17);

        line.add_lat_lng(TOKYO).unwrap();
        assert_eq!(line.points()[0].len(), 3);
        assert_eq!(line.statistics().vertices, 33);
        assert_eq!(line.rendered().len(), 2);
    }

    #[test]
    fn test_set_config_rebuilds() {
        let mut line = GeodesicLine::with_lat_lngs(vec![vec![BERLIN, SEATTLE]], Config::default()).unwrap();
        line.set_config(Config {
            wrap: true,
            steps: 0,
        })
        .unwrap();
        assert_eq!(line.config().steps, 0);
        assert_eq!(line.rendered()[0].len(), 3);
        assert_eq!(line.statistics().vertices, 3);
    }

    #[test]
    fn test_failed_update_keeps_previous_state() {
        let mut line = GeodesicLine::with_lat_lngs(vec![vec![SEATTLE, TOKYO]], Config::default()).unwrap();
        let rendered = line.rendered().to_vec();
        let statistics = line.statistics().clone();

        let antipodal = vec![vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0)]];
        assert!(line.set_lat_lngs(antipodal).is_err());
        assert!(line.add_lat_lng(LatLng::new(-35.47, -40.85)).is_err());
        assert_eq!(line.points(), &[vec![SEATTLE, TOKYO]]);
        assert_eq!(line.rendered(), rendered.as_slice());
        assert_eq!(line.statistics(), &statistics);
    }

    #[test]
    fn test_failed_add_keeps_pending_points() {
        // Nothing is built while the first path has a single waypoint
        let antipodal = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0)];
        let points = vec![vec![BERLIN], antipodal];
        let mut line = GeodesicLine::with_lat_lngs(points.clone(), Config::default()).unwrap();
        assert!(line.rendered().is_empty());

        assert!(line.add_lat_lng(SEATTLE).is_err());
        assert_eq!(line.points(), points.as_slice());
        assert!(line.rendered().is_empty());
        assert_eq!(line.statistics(), &Statistics::default());
    }

    #[test]
    fn test_distance_matches_statistics() {
        let line = GeodesicLine::with_lat_lngs(vec![vec![BERLIN, SEATTLE]], Config::default()).unwrap();
        let d = line.distance(BERLIN, SEATTLE);
        assert_eq!(line.statistics().distance_array, vec![d]);
    }

    #[test]
    fn test_to_geo() {
        let line = GeodesicLine::with_lat_lngs(vec![vec![SEATTLE, TOKYO]], Config::default()).unwrap();
        let multi = line.to_geo();
        assert_eq!(multi.0.len(), 2);
        assert_eq!(multi.0[0].0[0].x, SEATTLE.lng);
        assert_eq!(multi.0[0].0[0].y, SEATTLE.lat);
    }
}
