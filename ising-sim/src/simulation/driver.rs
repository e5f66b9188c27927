use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::mcmc::Metropolis;
use crate::spins::Lattice;
use crate::statistics::SampleSeries;

/// Outcome of thermalizing and sampling one temperature.
///
/// `lattice` is the final configuration, handed on as the starting point of
/// the next (lower) temperature.
#[derive(Debug, Clone)]
pub struct TemperatureRun {
    pub temperature: f64,
    pub lattice: Lattice,
    pub energy: SampleSeries,
    pub magnetization: SampleSeries,
    pub acceptance_rate: f64,
}

fn check_temperature(temperature: f64) -> Result<(), SimError> {
    if temperature.is_finite() && temperature > 0.0 {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    errors.add("temperature", ValidationError::new("temperature must be > 0"));
    Err(SimError::InvalidConfig(errors))
}

/// The lattice must have the configured size and coupling J; the updater
/// reads J from the lattice.
pub(crate) fn check_lattice(lattice: &Lattice, config: &SimConfig) -> Result<(), SimError> {
    if lattice.size() != config.lattice_size {
        return Err(SimError::InvalidLattice(format!(
            "lattice is {0}x{0} but lattice_size is {1}",
            lattice.size(),
            config.lattice_size
        )));
    }
    if lattice.coupling() != config.coupling {
        return Err(SimError::InvalidLattice(format!(
            "lattice coupling is {} but coupling is {}",
            lattice.coupling(),
            config.coupling
        )));
    }
    Ok(())
}

/// Thermalize `lattice` at `temperature`, then take `2^measurement_levels`
/// measurements spaced `sampling_interval` single-spin-flip attempts apart.
///
/// Phases:
/// 1. Warm-up: `warmup_steps` attempts, all intermediate states discarded.
/// 2. Sampling: repeat `sampling_interval` attempts followed by one reading of
///    the total energy and magnetization.
///
/// The interrupt flag is polled between blocks of `sampling_interval`
/// attempts. `on_measurement` is called once per measurement (useful for
/// progress bars).
pub fn run_temperature<R: Rng + ?Sized>(
    lattice: Lattice,
    temperature: f64,
    config: &SimConfig,
    rng: &mut R,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<TemperatureRun, SimError> {
    config.validate()?;
    check_temperature(temperature)?;
    check_lattice(&lattice, config)?;
    sample_temperature(lattice, temperature, config, rng, interrupted, on_measurement)
}

/// [`run_temperature`] without the precondition checks, for callers that
/// already checked the run parameters.
pub(crate) fn sample_temperature<R: Rng + ?Sized>(
    mut lattice: Lattice,
    temperature: f64,
    config: &SimConfig,
    rng: &mut R,
    interrupted: &AtomicBool,
    on_measurement: &dyn Fn(),
) -> Result<TemperatureRun, SimError> {
    let mut updater = Metropolis::new(temperature, lattice.coupling());
    let block = config.sampling_interval;

    let mut remaining = config.warmup_steps;
    while remaining > 0 {
        if interrupted.load(Ordering::Relaxed) {
            return Err(SimError::Interrupted { temperature });
        }
        let chunk = remaining.min(block);
        updater.run(&mut lattice, rng, chunk);
        remaining -= chunk;
    }
    debug!(
        temperature,
        energy = lattice.total_energy(),
        magnetization = lattice.total_magnetization(),
        "warm-up finished"
    );

    let n_measurements = config.n_measurements();
    let mut energy = SampleSeries::with_capacity(n_measurements);
    let mut magnetization = SampleSeries::with_capacity(n_measurements);

    for _ in 0..n_measurements {
        if interrupted.load(Ordering::Relaxed) {
            return Err(SimError::Interrupted { temperature });
        }
        updater.run(&mut lattice, rng, block);
        energy.push(lattice.total_energy());
        magnetization.push(lattice.total_magnetization() as f64);
        on_measurement();
    }

    let acceptance_rate = updater.acceptance_rate();
    debug!(temperature, acceptance_rate, "sampling finished");

    Ok(TemperatureRun {
        temperature,
        lattice,
        energy,
        magnetization,
        acceptance_rate,
    })
}
