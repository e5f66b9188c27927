use serde::{Deserialize, Serialize};

use super::series::Estimate;

/// Column names of the result table, in file order.
pub const RESULT_HEADER: [&str; 7] = [
    "temperature",
    "mean_magnetization",
    "error_magnetization",
    "correlation_time_magnetization",
    "mean_energy",
    "error_energy",
    "correlation_time_energy",
];

/// Observables of one simulated temperature.
///
/// Magnetization and energy are totals over the lattice, not per-site values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub temperature: f64,
    pub mean_magnetization: f64,
    pub error_magnetization: f64,
    pub correlation_time_magnetization: f64,
    pub mean_energy: f64,
    pub error_energy: f64,
    pub correlation_time_energy: f64,
}

impl ResultRow {
    pub fn new(temperature: f64, magnetization: Estimate, energy: Estimate) -> Self {
        Self {
            temperature,
            mean_magnetization: magnetization.mean,
            error_magnetization: magnetization.error,
            correlation_time_magnetization: magnetization.correlation_time,
            mean_energy: energy.mean,
            error_energy: energy.error,
            correlation_time_energy: energy.correlation_time,
        }
    }

    pub fn magnetization(&self) -> Estimate {
        Estimate {
            mean: self.mean_magnetization,
            error: self.error_magnetization,
            correlation_time: self.correlation_time_magnetization,
        }
    }

    pub fn energy(&self) -> Estimate {
        Estimate {
            mean: self.mean_energy,
            error: self.error_energy,
            correlation_time: self.correlation_time_energy,
        }
    }
}
