/// Error types for the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid coordinate '{input}': {reason}")]
    Coordinate { input: String, reason: String },

    #[error("Geodesic error: {0}")]
    Geodesic(#[from] geodesic_geom::GeodesicError),

    #[error("Subdivision depth {steps} is above the maximum of {max}")]
    StepsOutOfRange { steps: u32, max: u32 },

    #[error("No input: pass at least one --point or --gpx")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, CliError>;
