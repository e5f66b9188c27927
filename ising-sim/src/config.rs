use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::SimError;

/// How the statistical error of a sampled observable is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMethod {
    /// Integrated autocorrelation time from the normalized autocorrelation
    /// function, inflating the naive error by `sqrt(2 tau + 1)`.
    Autocorrelation,
    /// Binning analysis over `measurement_levels` pairwise-averaging levels.
    Binning,
}

impl TryFrom<&str> for ErrorMethod {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "autocorrelation" => Ok(Self::Autocorrelation),
            "binning" => Ok(Self::Binning),
            _ => Err(format!(
                "unknown error_method '{s}', expected 'autocorrelation' or 'binning'"
            )),
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.lattice_size < 2 {
        return Err(ValidationError::new("lattice_size must be >= 2"));
    }
    if !cfg.coupling.is_finite() || cfg.coupling == 0.0 {
        return Err(ValidationError::new("coupling must be finite and non-zero"));
    }
    if !cfg.t_min.is_finite() || cfg.t_min <= 0.0 {
        return Err(ValidationError::new("t_min must be > 0"));
    }
    if !cfg.t_max.is_finite() || cfg.t_max < cfg.t_min {
        return Err(ValidationError::new("t_max must be >= t_min"));
    }
    if !cfg.t_step.is_finite() || cfg.t_step <= 0.0 {
        return Err(ValidationError::new("t_step must be > 0"));
    }
    if !(1..=30).contains(&cfg.measurement_levels) {
        return Err(ValidationError::new("measurement_levels must be in 1..=30"));
    }
    if cfg.sampling_interval < 1 {
        return Err(ValidationError::new("sampling_interval must be >= 1"));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    Ok(())
}

/// Parameters of one temperature sweep.
///
/// Every iteration count is a field so tests can shrink them; the defaults
/// reproduce the reference run (32x32 lattice, T from 4 down to 1 in steps of
/// 0.1, 10^6 warm-up attempts, 2^16 measurements 1000 attempts apart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    /// Linear size N of the N x N lattice.
    pub lattice_size: usize,
    /// Nearest-neighbor coupling J.
    pub coupling: f64,
    /// Lowest simulated temperature (inclusive).
    pub t_min: f64,
    /// Highest simulated temperature (inclusive), simulated first.
    pub t_max: f64,
    /// Spacing between consecutive temperatures.
    pub t_step: f64,
    /// Single-spin-flip attempts discarded before measuring, per temperature.
    pub warmup_steps: usize,
    /// L such that `2^L` measurements are taken per temperature.
    pub measurement_levels: u32,
    /// Single-spin-flip attempts between two measurements.
    pub sampling_interval: usize,
    pub error_method: ErrorMethod,
    /// Largest lag considered by the autocorrelation estimator.
    pub autocorrelation_max_lag: Option<usize>,
    /// Seed of the run's single random stream.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lattice_size: 32,
            coupling: 1.0,
            t_min: 1.0,
            t_max: 4.0,
            t_step: 0.1,
            warmup_steps: 1_000_000,
            measurement_levels: 16,
            sampling_interval: 1000,
            error_method: ErrorMethod::Autocorrelation,
            autocorrelation_max_lag: Some(1000),
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Load a configuration from a YAML file. Missing fields take their
    /// defaults; the result is not validated yet.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of measurements M = 2^L taken per temperature.
    pub fn n_measurements(&self) -> usize {
        1usize << self.measurement_levels
    }

    /// Lag cutoff for the autocorrelation estimator, capped at M/4.
    pub fn effective_max_lag(&self) -> usize {
        let cap = self.n_measurements() / 4;
        self.autocorrelation_max_lag
            .unwrap_or(cap)
            .min(cap)
            .max(1)
    }

    /// Descending temperatures `t_max, t_max - t_step, ..., t_min`.
    ///
    /// `t_min` is included whenever `(t_max - t_min) / t_step` is integral up to
    /// rounding; otherwise the ladder stops at the last value above `t_min`.
    pub fn temperatures(&self) -> Vec<f64> {
        let span = (self.t_max - self.t_min) / self.t_step;
        let n_temps = (span + 1e-9).floor() as usize + 1;
        (0..n_temps)
            .map(|k| {
                let t = self.t_max - k as f64 * self.t_step;
                // Strip accumulated rounding so 4.0 - 3 * 0.1 reads back as 3.7.
                ((t * 1e12).round() / 1e12).max(self.t_min)
            })
            .collect()
    }
}
