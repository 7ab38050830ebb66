//! Input loading - Waypoints from the command line, GPX files and JSON config

use crate::error::{CliError, Result};
use geodesic_geom::{Config, LatLng, LineString, MultiLineString};
use std::io::Read;
use std::path::Path;

/// Parse a `LAT,LNG` pair in decimal degrees
pub fn parse_lat_lng(input: &str) -> Result<LatLng> {
    let invalid = |reason: &str| CliError::Coordinate {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| invalid("expected LAT,LNG"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid("latitude is not a number"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| invalid("longitude is not a number"))?;

    Ok(LatLng::new(lat, lng))
}

/// Read every track segment of a GPX document as one line
///
/// Empty segments are dropped.
pub fn read_gpx<R: Read>(reader: R) -> Result<MultiLineString> {
    let gpx = gpx::read(reader)?;

    let lines: MultiLineString = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .map(|segment| {
            segment
                .points
                .iter()
                .map(|waypoint| {
                    let point = waypoint.point();
                    LatLng::new(point.y(), point.x())
                })
                .collect::<LineString>()
        })
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines)
}

/// Load the lines of a GPX file
pub fn load_gpx_file(path: &Path) -> Result<MultiLineString> {
    #[cfg(feature = "profiling")]
    profiling::scope!("input::load_gpx_file");

    let file = std::fs::File::open(path)?;
    let lines = read_gpx(std::io::BufReader::new(file))?;
    tracing::info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Read a JSON [`Config`]; missing fields keep their defaults
pub fn read_config<R: Read>(reader: R) -> Result<Config> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a JSON [`Config`] file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let file = std::fs::File::open(path)?;
    let config = read_config(std::io::BufReader::new(file))?;
    tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
