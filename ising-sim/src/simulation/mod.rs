pub mod driver;
pub mod sweep;

pub use driver::{run_temperature, TemperatureRun};
pub use sweep::{run_temperature_sweep, simulate_to_csv, sweep_from, SweepOutcome};
