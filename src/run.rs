use crate::error::Result;
use crate::settings::Settings;
use geodesic_geom::{GeodesicLine, LineString, Statistics};
use serde::Serialize;
use std::io::Write;

/// JSON document written to stdout
#[derive(Debug, Serialize)]
struct Output<'a> {
    lines: &'a [LineString],
    statistics: &'a Statistics,
}

/// Build the geodesic lines described by the settings and print them
pub fn run(settings: &Settings) -> Result<()> {
    #[cfg(feature = "profiling")]
    profiling::scope!("run");

    let config = settings.config()?;
    let lines = settings.lines()?;
    tracing::info!(
        "Building {} lines (steps: {}, wrap: {})",
        lines.len(),
        config.steps,
        config.wrap
    );

    let line = GeodesicLine::with_lat_lngs(lines, config)?;
    if line.rendered().is_empty() {
        tracing::warn!("The first line needs at least two waypoints, nothing was rendered");
    }

    let stdout = std::io::stdout();
    write_output(&line, settings.pretty, stdout.lock())
}

fn write_output<W: Write>(line: &GeodesicLine, pretty: bool, mut writer: W) -> Result<()> {
    let output = Output {
        lines: line.rendered(),
        statistics: line.statistics(),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &output)?;
    } else {
        serde_json::to_writer(&mut writer, &output)?;
    }
    writeln!(writer)?;
    Ok(())
}
