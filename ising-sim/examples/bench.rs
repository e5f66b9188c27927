use std::sync::atomic::AtomicBool;
use std::time::Instant;

use ising_sim::{run_temperature, Lattice, Metropolis, SimConfig, CRITICAL_TEMPERATURE};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

const L: usize = 128;
const N_STEPS: usize = 50 * L * L;
const TEMPS: [f64; 3] = [1.0, CRITICAL_TEMPERATURE, 4.0];

fn main() {
    println!("Lattice: {}x{}  |  Attempts per temperature: {}", L, L, N_STEPS);
    println!("{}", "-".repeat(70));

    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    for &t in &TEMPS {
        let mut lattice = Lattice::random(L, 1.0, &mut rng).unwrap();
        let mut updater = Metropolis::new(t, 1.0);

        let t0 = Instant::now();
        updater.run(&mut lattice, &mut rng, N_STEPS);
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "T = {:.3}  |  {:.1} ns/attempt  |  acceptance {:.3}",
            t,
            elapsed / N_STEPS as f64 * 1e9,
            updater.acceptance_rate()
        );
    }

    let config = SimConfig {
        lattice_size: L,
        warmup_steps: N_STEPS,
        measurement_levels: 10,
        sampling_interval: L * L,
        ..SimConfig::default()
    };
    let lattice = Lattice::random(L, 1.0, &mut rng).unwrap();
    let t0 = Instant::now();
    run_temperature(
        lattice,
        CRITICAL_TEMPERATURE,
        &config,
        &mut rng,
        &AtomicBool::new(false),
        &|| {},
    )
    .unwrap();
    println!(
        "Full temperature at T_c ({} measurements): {:.3} s",
        config.n_measurements(),
        t0.elapsed().as_secs_f64()
    );
}
