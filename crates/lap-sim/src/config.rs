//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON settings
//! file, then `LAPSIM_*` environment variables. The CLI applies its flags
//! on top of whatever [`RunConfig::load`] returns.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::SimError;
use crate::pace::PaceBounds;

/// Settings file read when no explicit path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

pub const ENV_ROUTE: &str = "LAPSIM_ROUTE";
pub const ENV_DISTANCE: &str = "LAPSIM_DISTANCE";
pub const ENV_DURATION: &str = "LAPSIM_DURATION";
pub const ENV_SEED: &str = "LAPSIM_SEED";

/// Parameters of a simulated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Route to run on. Required before a run can be planned.
    pub route_id: Option<u32>,

    /// Target distance in meters.
    pub distance_m: f64,

    /// The planned distance varies uniformly by up to this much either way.
    pub distance_variation_m: f64,

    /// Target duration in seconds.
    pub duration_s: f64,

    /// The planned duration varies uniformly by up to this much either way.
    pub duration_variation_s: f64,

    /// Time between reported points.
    pub sample_interval_s: f64,

    /// Reported distance never drops below this, so pace stays finite.
    pub min_reported_distance_m: f64,

    pub pace: PaceBounds,

    /// Fixed RNG seed for reproducible traces.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            route_id: None,
            distance_m: 850.0,
            distance_variation_m: 25.0,
            duration_s: 320.0,
            duration_variation_s: 10.0,
            sample_interval_s: 1.0,
            min_reported_distance_m: 0.1,
            pace: PaceBounds::default(),
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads defaults, the settings file and environment overrides.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_SETTINGS_FILE`]
    /// is read if present and silently skipped otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, SimError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_SETTINGS_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, SimError> {
        debug!("Reading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Applies `LAPSIM_*` overrides fetched through `lookup`.
    ///
    /// Blank values are ignored; unparsable ones are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(route) = env_value(&lookup, ENV_ROUTE) {
            self.route_id = Some(route);
        }
        if let Some(distance) = env_value(&lookup, ENV_DISTANCE) {
            self.distance_m = distance;
        }
        if let Some(duration) = env_value(&lookup, ENV_DURATION) {
            self.duration_s = duration;
        }
        if let Some(seed) = env_value(&lookup, ENV_SEED) {
            self.seed = Some(seed);
        }
    }

    /// Checks that a run can be planned from these values.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        let finite = [
            ("distance", self.distance_m),
            ("distance variation", self.distance_variation_m),
            ("duration", self.duration_s),
            ("duration variation", self.duration_variation_s),
            ("sample interval", self.sample_interval_s),
            ("minimum reported distance", self.min_reported_distance_m),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }

        if self.distance_m <= 0.0 {
            return invalid(format!("distance must be positive, got {}", self.distance_m));
        }
        if !(0.0..self.distance_m).contains(&self.distance_variation_m) {
            return invalid(format!(
                "distance variation {} must be in [0, {})",
                self.distance_variation_m, self.distance_m
            ));
        }
        if self.duration_s <= 0.0 {
            return invalid(format!("duration must be positive, got {}", self.duration_s));
        }
        if !(0.0..self.duration_s).contains(&self.duration_variation_s) {
            return invalid(format!(
                "duration variation {} must be in [0, {})",
                self.duration_variation_s, self.duration_s
            ));
        }
        if self.sample_interval_s <= 0.0 {
            return invalid(format!(
                "sample interval must be positive, got {}",
                self.sample_interval_s
            ));
        }
        if self.min_reported_distance_m < 0.0 {
            return invalid("minimum reported distance must not be negative".to_string());
        }
        if !self.pace.is_consistent() {
            return invalid(format!("inconsistent pace bounds {:?}", self.pace));
        }

        Ok(())
    }
}

fn env_value<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.distance_m, 850.0);
        assert_eq!(config.duration_s, 320.0);
        assert_eq!(config.route_id, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RunConfig::from_json(r#"{"route_id": 30, "distance_m": 1200.0}"#).unwrap();
        assert_eq!(config.route_id, Some(30));
        assert_eq!(config.distance_m, 1200.0);
        assert_eq!(config.duration_s, 320.0);
        assert_eq!(config.pace, PaceBounds::default());
    }

    #[test]
    fn test_nested_pace_override() {
        let config = RunConfig::from_json(r#"{"pace": {"max_s_per_km": 480.0}}"#).unwrap();
        assert_eq!(config.pace.max_s_per_km, 480.0);
        assert_eq!(config.pace.min_s_per_km, 180.0);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RunConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RunConfig::default();
        config.apply_env(env(&[
            (ENV_ROUTE, "34"),
            (ENV_DISTANCE, " 2000 "),
            (ENV_DURATION, ""),
            (ENV_SEED, "not-a-number"),
        ]));

        assert_eq!(config.route_id, Some(34));
        assert_eq!(config.distance_m, 2000.0);
        assert_eq!(config.duration_s, 320.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("lapsim_test_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"duration_s": 600.0, "seed": 5}"#).unwrap();

        let config = RunConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.duration_s, 600.0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join(format!("lapsim_missing_{}.json", std::process::id()));
        let err = RunConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn test_infinite_env_values_rejected() {
        for key in [ENV_DISTANCE, ENV_DURATION] {
            let mut config = RunConfig::default();
            config.apply_env(env(&[(key, "inf")]));
            assert!(
                matches!(config.validate(), Err(SimError::InvalidConfig(_))),
                "{key}=inf should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RunConfig {
                distance_m: 0.0,
                ..Default::default()
            },
            RunConfig {
                distance_variation_m: 900.0,
                ..Default::default()
            },
            RunConfig {
                duration_s: -1.0,
                ..Default::default()
            },
            RunConfig {
                sample_interval_s: 0.0,
                ..Default::default()
            },
            RunConfig {
                distance_m: f64::INFINITY,
                ..Default::default()
            },
            RunConfig {
                duration_s: f64::INFINITY,
                ..Default::default()
            },
            RunConfig {
                distance_m: f64::NAN,
                ..Default::default()
            },
            RunConfig {
                sample_interval_s: f64::INFINITY,
                ..Default::default()
            },
            RunConfig {
                pace: PaceBounds {
                    fallback_s_per_km: 900.0,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(SimError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
