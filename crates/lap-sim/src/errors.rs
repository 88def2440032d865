use thiserror::Error;
use track_geometry::TrackError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid run plan: {0}")]
    InvalidPlan(String),
}
