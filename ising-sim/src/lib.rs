pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod output;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{ErrorMethod, SimConfig};
pub use error::SimError;
pub use mcmc::Metropolis;
pub use output::{read_results, write_results, ResultWriter, RowSink};
pub use simulation::{
    run_temperature, run_temperature_sweep, simulate_to_csv, sweep_from, SweepOutcome,
    TemperatureRun,
};
pub use spins::Lattice;
pub use statistics::{Estimate, ResultRow, SampleSeries};

/// Onsager's critical temperature of the square-lattice Ising model for
/// `J = k_B = 1`: `2 / ln(1 + sqrt(2))`.
pub const CRITICAL_TEMPERATURE: f64 = 2.269_185_314_213_022;
