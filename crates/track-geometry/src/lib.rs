//! Running-track geometry.
//!
//! Converts a distance travelled along a standard oval track into a
//! geographic coordinate, and holds the table of known campus tracks.
//!
//! # Quick Start
//!
//! ```rust
//! use track_geometry::TrackRegistry;
//!
//! let track = TrackRegistry::global().lookup(28)?;
//! let start = track.coordinate(0.0);
//! let halfway = track.coordinate(track.lap_length() / 2.0);
//! assert!(start.distance_to(halfway) > 100.0);
//! # Ok::<(), track_geometry::TrackError>(())
//! ```

pub mod errors;
pub mod geodesy;
pub mod geometry;
pub mod registry;

pub use errors::TrackError;
pub use geodesy::{Direction, GeoPoint};
pub use geometry::{
    CURVE_RADIUS_M, MAX_JITTER_M, STRAIGHT_LENGTH_M, SegmentId, TrackGeometry, TrackPosition,
};
pub use registry::{Campus, Route, Session, TrackRegistry};
