//! Lap-track workout simulation.
//!
//! Plans a run on one of the registered tracks, walks it step by step
//! into a timestamped GPS trace, and exports the result.
//!
//! # Quick Start
//!
//! ```rust
//! use lap_sim::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let config = RunConfig::default();
//! let track = TrackRegistry::global().lookup(28)?;
//!
//! let plan = RunPlan::new(28, &config, &mut rng)?;
//! let trace = Simulator::new(track, plan, time::OffsetDateTime::UNIX_EPOCH).run(&mut rng);
//! assert!(trace.summary().distance_m > 800.0);
//! # Ok::<(), lap_sim::SimError>(())
//! ```

pub mod config;
pub mod errors;
pub mod export;
pub mod pace;
pub mod plan;
pub mod trace;

pub use errors::SimError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::RunConfig;
    pub use crate::errors::SimError;
    pub use crate::export::{TraceFormat, save, to_gpx, write_gpx, write_json};
    pub use crate::pace::{PaceBounds, format_pace, pace_s_per_km};
    pub use crate::plan::RunPlan;
    pub use crate::trace::{Simulator, Trace, TraceSample, TraceSummary};
    pub use track_geometry::{GeoPoint, TrackGeometry, TrackRegistry};
}
