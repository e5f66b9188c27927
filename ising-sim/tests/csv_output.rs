use std::cell::Cell;
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};

use ising_sim::{read_results, simulate_to_csv, SimConfig, SimError};

fn small_sweep() -> SimConfig {
    SimConfig {
        lattice_size: 4,
        t_min: 1.0,
        t_max: 2.0,
        t_step: 0.5,
        warmup_steps: 200,
        measurement_levels: 3,
        sampling_interval: 4,
        ..SimConfig::default()
    }
}

#[test]
fn file_holds_header_and_one_row_per_temperature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_monte_carlo_ising.csv");
    let out = simulate_to_csv(&small_sweep(), &path, &AtomicBool::new(false), &|| {}).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "temperature,mean_magnetization,error_magnetization,correlation_time_magnetization,\
         mean_energy,error_energy,correlation_time_energy"
    );
    assert_eq!(lines.count(), 3);

    let rows = read_results(&path).unwrap();
    assert_eq!(rows, out.rows);
    let temps: Vec<f64> = rows.iter().map(|r| r.temperature).collect();
    assert_eq!(temps, vec![2.0, 1.5, 1.0]);
}

#[test]
fn rerun_truncates_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    fs::write(&path, "stale,contents\n1,2\n").unwrap();

    let cfg = SimConfig {
        t_min: 2.0,
        ..small_sweep()
    };
    simulate_to_csv(&cfg, &path, &AtomicBool::new(false), &|| {}).unwrap();
    assert_eq!(read_results(&path).unwrap().len(), 1);
}

#[test]
fn interrupted_sweep_keeps_finished_rows() {
    let cfg = small_sweep();
    let per_temperature = cfg.n_measurements();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.csv");

    let interrupted = AtomicBool::new(false);
    let seen = Cell::new(0usize);
    let on_measurement = || {
        seen.set(seen.get() + 1);
        if seen.get() == per_temperature {
            interrupted.store(true, Ordering::Relaxed);
        }
    };
    let err = simulate_to_csv(&cfg, &path, &interrupted, &on_measurement).unwrap_err();

    assert!(matches!(err, SimError::Interrupted { temperature } if temperature == 1.5));
    let rows = read_results(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].temperature, 2.0);
}

#[test]
fn invalid_config_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.csv");
    let cfg = SimConfig {
        measurement_levels: 0,
        ..small_sweep()
    };
    let err = simulate_to_csv(&cfg, &path, &AtomicBool::new(false), &|| {}).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfig(_)));
    assert!(!path.exists());
}
