use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{simulate_to_csv, SimConfig, SimError, CRITICAL_TEMPERATURE};
use tracing::{info, warn};
use validator::Validate;

mod cli;

use cli::Args;

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => SimConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid simulation parameters")?;
    Ok(config)
}

fn progress_bar(config: &SimConfig, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let total = config.temperatures().len() * config.n_measurements();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=>-"),
    );
    pb.set_message("Measuring");
    Ok(pb)
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    info!(
        lattice_size = config.lattice_size,
        t_max = config.t_max,
        t_min = config.t_min,
        n_temperatures = config.temperatures().len(),
        n_measurements = config.n_measurements(),
        error_method = ?config.error_method,
        seed = config.seed,
        "starting sweep (T_c = {CRITICAL_TEMPERATURE:.4})"
    );

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("failed to install interrupt handler")?;

    let pb = progress_bar(&config, args.no_progress)?;
    let result = simulate_to_csv(&config, &args.output, &interrupted, &|| pb.inc(1));
    pb.finish_and_clear();

    match result {
        Ok(outcome) => {
            info!(
                rows = outcome.rows.len(),
                path = %args.output.display(),
                "sweep finished"
            );
            Ok(())
        }
        Err(SimError::Interrupted { temperature }) => {
            warn!(
                temperature,
                path = %args.output.display(),
                "interrupted, rows for finished temperatures were kept"
            );
            Err(SimError::Interrupted { temperature }.into())
        }
        Err(err) => {
            Err(err).with_context(|| format!("sweep writing {} failed", args.output.display()))
        }
    }
}
