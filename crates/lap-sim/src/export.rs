//! Trace export to GPX 1.1 and JSON.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geo::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use tracing::info;

use crate::errors::SimError;
use crate::trace::Trace;

const CREATOR: &str = "lap-sim";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TraceFormat {
    Gpx,
    Json,
}

impl TraceFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "gpx" => Some(Self::Gpx),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for TraceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceFormat::Gpx => f.write_str("GPX"),
            TraceFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Builds a single-track, single-segment GPX document from a trace.
pub fn to_gpx(trace: &Trace, name: &str) -> Gpx {
    let points = trace
        .points()
        .map(|sample| {
            let mut wp = Waypoint::new(Point::from(sample.point));
            wp.time = Some(gpx::Time::from(sample.timestamp));
            wp
        })
        .collect();

    let mut track = Track::new();
    track.name = Some(name.to_string());
    track.segments = vec![TrackSegment { points }];

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        tracks: vec![track],
        ..Default::default()
    }
}

pub fn write_gpx<W: Write>(trace: &Trace, name: &str, writer: W) -> Result<(), SimError> {
    gpx::write(&to_gpx(trace, name), writer)?;
    Ok(())
}

pub fn write_json<W: Write>(trace: &Trace, writer: W) -> Result<(), SimError> {
    serde_json::to_writer_pretty(writer, trace)?;
    Ok(())
}

/// Writes a trace to `path` in the given format.
pub fn save(trace: &Trace, name: &str, path: &Path, format: TraceFormat) -> Result<(), SimError> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        TraceFormat::Gpx => write_gpx(trace, name, &mut writer)?,
        TraceFormat::Json => write_json(trace, &mut writer)?,
    }
    writer.flush()?;

    info!("Wrote {} trace to {}", format, path.display());
    Ok(())
}
