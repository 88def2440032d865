//! Trace simulation along a track.

use std::iter;

use rand::Rng;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use track_geometry::{GeoPoint, TrackGeometry};

use crate::pace::{format_pace, pace_s_per_km};
use crate::plan::RunPlan;

/// One reported GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSample {
    pub step: usize,
    pub point: GeoPoint,
    pub distance_m: f64,
    pub elapsed_s: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub pace_s_per_km: f64,
}

/// A complete simulated run: in-progress samples plus the finishing fix.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub route_id: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub samples: Vec<TraceSample>,
    pub finish: TraceSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceSummary {
    pub distance_m: f64,
    pub duration_s: f64,
    pub pace_s_per_km: f64,
    pub point_count: usize,
    /// Geodesic length of the polyline through every reported point.
    pub path_length_m: f64,
}

impl Trace {
    /// Every reported point in order, finish included.
    pub fn points(&self) -> impl Iterator<Item = &TraceSample> {
        self.samples.iter().chain(iter::once(&self.finish))
    }

    pub fn summary(&self) -> TraceSummary {
        let path_length_m = self
            .points()
            .zip(self.points().skip(1))
            .map(|(a, b)| a.point.distance_to(b.point))
            .sum();

        TraceSummary {
            distance_m: self.finish.distance_m,
            duration_s: self.finish.elapsed_s,
            pace_s_per_km: self.finish.pace_s_per_km,
            point_count: self.samples.len() + 1,
            path_length_m,
        }
    }
}

/// Walks a [`RunPlan`] around a track, producing one sample per step.
pub struct Simulator<'a> {
    geometry: &'a TrackGeometry,
    plan: RunPlan,
    started_at: OffsetDateTime,
}

impl<'a> Simulator<'a> {
    pub fn new(geometry: &'a TrackGeometry, plan: RunPlan, started_at: OffsetDateTime) -> Self {
        Self {
            geometry,
            plan,
            started_at,
        }
    }

    /// The in-progress sample for `step` (1-based), with GPS jitter.
    pub fn sample<R: Rng + ?Sized>(&self, step: usize, rng: &mut R) -> TraceSample {
        let distance_m = self.plan.distance_at(step);
        let elapsed_s = self.plan.elapsed_at(step);
        let point = self.geometry.random_offset(distance_m, rng);

        TraceSample {
            step,
            point,
            distance_m,
            elapsed_s,
            timestamp: self.timestamp_at(elapsed_s),
            pace_s_per_km: self.plan.pace.clamped(elapsed_s, distance_m),
        }
    }

    /// The finishing sample: exact position, unclamped average pace.
    pub fn finish(&self) -> TraceSample {
        let distance_m = self.plan.distance_m;
        let elapsed_s = self.plan.total_elapsed();

        TraceSample {
            step: self.plan.steps + 1,
            point: self.geometry.coordinate(distance_m),
            distance_m,
            elapsed_s,
            timestamp: self.timestamp_at(elapsed_s),
            pace_s_per_km: pace_s_per_km(elapsed_s, distance_m)
                .unwrap_or(self.plan.pace.fallback_s_per_km),
        }
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Trace {
        info!(
            "Simulating route {}: {:.2}m over {} steps",
            self.plan.route_id, self.plan.distance_m, self.plan.steps
        );

        let samples: Vec<TraceSample> = (1..=self.plan.steps)
            .map(|step| {
                let sample = self.sample(step, rng);
                debug!(
                    "step {}: {} ({:.2}m / {:.2}m)",
                    step, sample.point, sample.distance_m, self.plan.distance_m
                );
                sample
            })
            .collect();

        let finish = self.finish();
        info!(
            "Finished at {} after {:.0}s, pace {}",
            finish.point,
            finish.elapsed_s,
            format_pace(finish.pace_s_per_km)
        );

        Trace {
            route_id: self.plan.route_id,
            started_at: self.started_at,
            samples,
            finish,
        }
    }

    fn timestamp_at(&self, elapsed_s: f64) -> OffsetDateTime {
        self.started_at + Duration::seconds_f64(elapsed_s)
    }
}
