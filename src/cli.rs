//! Command-line arguments of the `ising` binary.

use std::path::PathBuf;

use clap::Parser;
use ising_sim::{ErrorMethod, SimConfig};

/// Metropolis temperature sweep of the 2D Ising model, written as CSV
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration file; omitted fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Result table to (over)write
    #[arg(short, long, default_value = "data_monte_carlo_ising.csv")]
    pub output: PathBuf,

    /// Override lattice size N
    #[arg(long)]
    pub lattice_size: Option<usize>,

    /// Override lowest temperature
    #[arg(long)]
    pub t_min: Option<f64>,

    /// Override highest temperature
    #[arg(long)]
    pub t_max: Option<f64>,

    /// Override temperature spacing
    #[arg(long)]
    pub t_step: Option<f64>,

    /// Override warm-up attempts per temperature
    #[arg(long)]
    pub warmup_steps: Option<usize>,

    /// Override L, the run takes 2^L measurements per temperature
    #[arg(long)]
    pub measurement_levels: Option<u32>,

    /// Override attempts between measurements
    #[arg(long)]
    pub sampling_interval: Option<usize>,

    /// Error estimator (autocorrelation or binning)
    #[arg(long, value_parser = parse_error_method)]
    pub error_method: Option<ErrorMethod>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

fn parse_error_method(s: &str) -> Result<ErrorMethod, String> {
    ErrorMethod::try_from(s)
}

impl Args {
    /// Apply the command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(n) = self.lattice_size {
            config.lattice_size = n;
        }
        if let Some(t) = self.t_min {
            config.t_min = t;
        }
        if let Some(t) = self.t_max {
            config.t_max = t;
        }
        if let Some(dt) = self.t_step {
            config.t_step = dt;
        }
        if let Some(n) = self.warmup_steps {
            config.warmup_steps = n;
        }
        if let Some(l) = self.measurement_levels {
            config.measurement_levels = l;
        }
        if let Some(n) = self.sampling_interval {
            config.sampling_interval = n;
        }
        if let Some(method) = self.error_method {
            config.error_method = method;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::WARN,
            (false, 0) => tracing::Level::INFO,
            (false, 1) => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
