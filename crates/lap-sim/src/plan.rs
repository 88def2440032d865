//! Run planning: fixes the distance, duration and step schedule of a run.

use rand::Rng;
use serde::Serialize;

use crate::config::RunConfig;
use crate::errors::SimError;
use crate::pace::PaceBounds;

/// Upper bound on in-progress samples; a day at one sample per second.
pub const MAX_STEPS: usize = 86_400;

/// A concrete run: randomized targets resolved into a fixed step schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunPlan {
    pub route_id: u32,
    /// Total distance covered, in meters.
    pub distance_m: f64,
    /// Drawn duration in seconds, before rounding down to whole steps.
    pub duration_s: f64,
    /// Number of in-progress samples.
    pub steps: usize,
    pub sample_interval_s: f64,
    pub min_reported_distance_m: f64,
    pub pace: PaceBounds,
}

impl RunPlan {
    /// Draws a plan around the targets in `config`.
    pub fn new<R: Rng + ?Sized>(
        route_id: u32,
        config: &RunConfig,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let distance_m = config.distance_m + vary(rng, config.distance_variation_m);
        let duration_s = config.duration_s + vary(rng, config.duration_variation_s);
        let step_count = (duration_s / config.sample_interval_s).floor();

        if !(distance_m > 0.0) {
            return Err(SimError::InvalidPlan(format!(
                "planned distance {distance_m:.2}m is not positive"
            )));
        }
        if step_count > MAX_STEPS as f64 {
            return Err(SimError::InvalidPlan(format!(
                "duration {duration_s:.2}s needs {step_count} samples, more than {MAX_STEPS}"
            )));
        }
        let steps = step_count as usize;
        if steps == 0 {
            return Err(SimError::InvalidPlan(format!(
                "duration {duration_s:.2}s is shorter than one {}s sample",
                config.sample_interval_s
            )));
        }

        Ok(Self {
            route_id,
            distance_m,
            duration_s,
            steps,
            sample_interval_s: config.sample_interval_s,
            min_reported_distance_m: config.min_reported_distance_m,
            pace: config.pace,
        })
    }

    pub fn distance_per_step(&self) -> f64 {
        self.distance_m / self.steps as f64
    }

    /// Distance reported at `step` (1-based), capped at the planned total.
    pub fn distance_at(&self, step: usize) -> f64 {
        (step as f64 * self.distance_per_step())
            .min(self.distance_m)
            .max(self.min_reported_distance_m)
    }

    pub fn elapsed_at(&self, step: usize) -> f64 {
        step as f64 * self.sample_interval_s
    }

    /// Elapsed time at the finish: every step, end to end.
    pub fn total_elapsed(&self) -> f64 {
        self.elapsed_at(self.steps)
    }
}

fn vary<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    if spread > 0.0 {
        rng.gen_range(-spread..=spread)
    } else {
        0.0
    }
}
