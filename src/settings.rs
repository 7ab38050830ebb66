use crate::error::{CliError, Result};
use crate::input;
use clap::Parser;
use geodesic_geom::{Config, LatLng, MultiLineString};
use std::path::PathBuf;

/// Deepest subdivision accepted from the command line or a config file
pub const MAX_STEPS: u32 = 20;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Geodesic Line - Build great-circle paths and split them for equirectangular maps
pub struct Settings {
    /// Waypoint of the command-line line; repeat for each point
    #[arg(long = "point", value_name = "LAT,LNG", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<LatLng>,

    /// GPX file; every track segment becomes one line
    #[arg(long = "gpx", value_name = "FILE")]
    pub gpx_files: Vec<PathBuf>,

    /// Recursive subdivision depth (each segment gets 2^(steps+1) pieces) [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_STEPS)))]
    pub steps: Option<u32>,

    /// Do not split paths at the antimeridian
    #[arg(long)]
    pub no_wrap: bool,

    /// JSON config file; command-line flags override its values
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn parse_point(value: &str) -> std::result::Result<LatLng, String> {
    input::parse_lat_lng(value).map_err(|err| err.to_string())
}

impl Settings {
    /// Effective configuration: the config file (or defaults) overridden by flags
    pub fn config(&self) -> Result<Config> {
        let base = match &self.config_file {
            Some(path) => input::load_config_file(path)?,
            None => Config::default(),
        };
        let config = self.apply_overrides(base);
        if config.steps > MAX_STEPS {
            return Err(CliError::StepsOutOfRange {
                steps: config.steps,
                max: MAX_STEPS,
            });
        }
        Ok(config)
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if self.no_wrap {
            config.wrap = false;
        }
        config
    }

    /// All input lines: the `--point` line first, then every GPX segment in file order
    pub fn lines(&self) -> Result<MultiLineString> {
        let mut lines = MultiLineString::new();
        if !self.points.is_empty() {
            lines.push(self.points.clone());
        }
        for path in &self.gpx_files {
            lines.extend(input::load_gpx_file(path)?);
        }

        if lines.is_empty() {
            return Err(CliError::NoInput);
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        Settings::try_parse_from(std::iter::once("geodesic-line").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&["--point", "47.56,-122.33"]);
        assert_eq!(settings.config().unwrap(), Config::default());
        assert!(!settings.pretty);
        assert!(settings.gpx_files.is_empty());
    }

    #[test]
    fn test_repeated_points_with_negative_values() {
        let settings = parse(&[
            "--point",
            "-33.94,18.39",
            "--point=35.47,139.15",
            "--point",
            "47.56,-122.33",
        ]);
        assert_eq!(
            settings.points,
            vec![
                LatLng::new(-33.94, 18.39),
                LatLng::new(35.47, 139.15),
                LatLng::new(47.56, -122.33),
            ]
        );
        assert_eq!(settings.lines().unwrap(), vec![settings.points.clone()]);
    }

    #[test]
    fn test_invalid_point_is_rejected() {
        let result = Settings::try_parse_from(["geodesic-line", "--point", "47.56"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let settings = parse(&["--steps", "1", "--no-wrap"]);
        let config = settings.apply_overrides(Config { wrap: true, steps: 6 });
        assert_eq!(config, Config { wrap: false, steps: 1 });

        let settings = parse(&[]);
        let file_config = Config { wrap: false, steps: 6 };
        assert_eq!(settings.apply_overrides(file_config), file_config);
    }

    #[test]
    fn test_steps_are_bounded() {
        assert_eq!(parse(&["--steps", "20"]).steps, Some(MAX_STEPS));
        assert!(Settings::try_parse_from(["geodesic-line", "--steps", "21"]).is_err());
        assert!(Settings::try_parse_from(["geodesic-line", "--steps", "4294967295"]).is_err());
    }

    #[test]
    fn test_config_file_steps_are_bounded() {
        let path = std::env::temp_dir()
            .join(format!("geodesic-line-steps-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"steps": 4294967295}"#).unwrap();
        let settings = parse(&["--config", path.to_str().unwrap()]);
        let result = settings.config();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(CliError::StepsOutOfRange { steps: u32::MAX, max: MAX_STEPS })
        ));
    }

    #[test]
    fn test_no_input() {
        let settings = parse(&["--pretty"]);
        assert!(matches!(settings.lines(), Err(CliError::NoInput)));
    }
}
