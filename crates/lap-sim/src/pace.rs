//! Pace in seconds per kilometre.

use serde::{Deserialize, Serialize};

/// Limits applied to the pace reported while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceBounds {
    /// Fastest reportable pace (3:00/km).
    pub min_s_per_km: f64,
    /// Slowest reportable pace (10:00/km).
    pub max_s_per_km: f64,
    /// Reported when no pace can be computed yet.
    pub fallback_s_per_km: f64,
}

impl Default for PaceBounds {
    fn default() -> Self {
        Self {
            min_s_per_km: 180.0,
            max_s_per_km: 600.0,
            fallback_s_per_km: 300.0,
        }
    }
}

impl PaceBounds {
    /// Pace for `elapsed_s` over `distance_m`, held inside the bounds.
    pub fn clamped(&self, elapsed_s: f64, distance_m: f64) -> f64 {
        pace_s_per_km(elapsed_s, distance_m)
            .map(|p| p.clamp(self.min_s_per_km, self.max_s_per_km))
            .unwrap_or(self.fallback_s_per_km)
    }

    pub fn is_consistent(&self) -> bool {
        self.min_s_per_km > 0.0
            && self.min_s_per_km <= self.fallback_s_per_km
            && self.fallback_s_per_km <= self.max_s_per_km
    }
}

/// Raw pace, or `None` until both time and distance are positive.
pub fn pace_s_per_km(elapsed_s: f64, distance_m: f64) -> Option<f64> {
    (elapsed_s > 0.0 && distance_m > 0.0).then(|| elapsed_s / (distance_m / 1000.0))
}

/// Formats a pace as `m:ss/km`.
pub fn format_pace(s_per_km: f64) -> String {
    let total = s_per_km.round() as u64;
    format!("{}:{:02}/km", total / 60, total % 60)
}
