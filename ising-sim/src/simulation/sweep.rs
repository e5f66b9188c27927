use std::path::Path;
use std::sync::atomic::AtomicBool;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;
use validator::Validate;

use super::driver::{check_lattice, sample_temperature};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::output::{ResultWriter, RowSink};
use crate::spins::Lattice;
use crate::statistics::ResultRow;

/// Rows produced by a temperature sweep and the lattice left at the lowest
/// temperature.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub rows: Vec<ResultRow>,
    pub lattice: Lattice,
}

/// Simulate every temperature of `config.temperatures()`, hottest first.
///
/// A single xoshiro stream seeded with `config.seed` drives the initial random
/// lattice and every Metropolis step, so a run is reproducible from its
/// configuration alone. Each finished temperature is appended to `sink`
/// before the next one starts.
pub fn run_temperature_sweep(
    config: &SimConfig,
    sink: &mut dyn RowSink,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<SweepOutcome, SimError> {
    config.validate()?;
    seeded_sweep(config, sink, interrupted, on_measurement)
}

/// Temperature sweep starting from an explicit lattice.
///
/// The lattice is moved from one temperature to the next: the configuration
/// sampled at `T` is the warm start of `T - t_step`. Its size and coupling
/// must match `config`.
pub fn sweep_from<R: Rng + ?Sized>(
    lattice: Lattice,
    config: &SimConfig,
    rng: &mut R,
    sink: &mut dyn RowSink,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<SweepOutcome, SimError> {
    config.validate()?;
    check_lattice(&lattice, config)?;
    chain_temperatures(lattice, config, rng, sink, interrupted, on_measurement)
}

/// Run the sweep and write its result table to `path`.
///
/// The file is truncated and its header written before the first
/// temperature; rows are flushed as they are produced.
pub fn simulate_to_csv(
    config: &SimConfig,
    path: impl AsRef<Path>,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<SweepOutcome, SimError> {
    config.validate()?;
    let mut writer = ResultWriter::create(path)?;
    seeded_sweep(config, &mut writer, interrupted, on_measurement)
}

fn seeded_sweep(
    config: &SimConfig,
    sink: &mut dyn RowSink,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<SweepOutcome, SimError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
    let lattice = Lattice::random(config.lattice_size, config.coupling, &mut rng)?;
    chain_temperatures(lattice, config, &mut rng, sink, interrupted, on_measurement)
}

/// Expects a validated `config` and a lattice matching it.
fn chain_temperatures<R: Rng + ?Sized>(
    lattice: Lattice,
    config: &SimConfig,
    rng: &mut R,
    sink: &mut dyn RowSink,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<SweepOutcome, SimError> {
    let temperatures = config.temperatures();
    let max_lag = config.effective_max_lag();
    let mut rows = Vec::with_capacity(temperatures.len());
    let mut lattice = lattice;

    for (k, &temperature) in temperatures.iter().enumerate() {
        info!(
            temperature,
            step = k + 1,
            of = temperatures.len(),
            "simulating temperature"
        );
        let run =
            sample_temperature(lattice, temperature, config, rng, interrupted, on_measurement)?;

        let magnetization = run.magnetization.estimate(config.error_method, max_lag);
        let energy = run.energy.estimate(config.error_method, max_lag);
        let row = ResultRow::new(temperature, magnetization, energy);
        info!(
            temperature,
            magnetization = row.mean_magnetization,
            magnetization_error = row.error_magnetization,
            energy = row.mean_energy,
            energy_error = row.error_energy,
            acceptance_rate = run.acceptance_rate,
            "temperature done"
        );

        sink.push_row(&row)?;
        rows.push(row);
        lattice = run.lattice;
    }

    Ok(SweepOutcome { rows, lattice })
}
