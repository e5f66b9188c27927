use rand::Rng;

use crate::spins::Lattice;

/// Metropolis acceptance probability `min(1, exp(-delta_e / T))`, k_B = 1.
#[inline]
pub fn acceptance_probability(delta_e: f64, temperature: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else {
        (-delta_e / temperature).exp()
    }
}

/// Single-spin-flip Metropolis updater at a fixed temperature.
///
/// On the square lattice `s_ij * h_ij` only takes the values -4, -2, 0, 2, 4,
/// so the acceptance probability of every possible flip is tabulated once per
/// temperature.
#[derive(Debug, Clone)]
pub struct Metropolis {
    temperature: f64,
    /// `table[(s * h + 4) / 2]` is the acceptance probability of a flip with
    /// `delta_e = 2 J s h`.
    table: [f64; 5],
    accepted: u64,
    attempted: u64,
}

impl Metropolis {
    /// `temperature` must be strictly positive; the run configuration is
    /// validated before any updater is built.
    pub fn new(temperature: f64, coupling: f64) -> Self {
        debug_assert!(temperature > 0.0, "temperature must be > 0");
        let mut table = [0.0; 5];
        for (k, p) in table.iter_mut().enumerate() {
            let sh = 2 * k as i32 - 4;
            *p = acceptance_probability(2.0 * coupling * f64::from(sh), temperature);
        }
        Self {
            temperature,
            table,
            accepted: 0,
            attempted: 0,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Metropolis test for an arbitrary energy change. Non-positive changes are
    /// accepted without consuming a random number.
    #[inline]
    pub fn accepts<R: Rng + ?Sized>(&self, delta_e: f64, rng: &mut R) -> bool {
        delta_e <= 0.0 || rng.gen::<f64>() < acceptance_probability(delta_e, self.temperature)
    }

    /// One proposed flip of a uniformly chosen site `(i, j)`.
    ///
    /// Returns whether the flip was accepted; on rejection the lattice is
    /// untouched.
    pub fn step<R: Rng + ?Sized>(&mut self, lattice: &mut Lattice, rng: &mut R) -> bool {
        let size = lattice.size();
        let i = rng.gen_range(0..size);
        let j = rng.gen_range(0..size);

        let sh = i32::from(lattice.spin(i, j)) * lattice.energy_contribution(i, j);
        let p = self.table[((sh + 4) / 2) as usize];

        self.attempted += 1;
        if p >= 1.0 || rng.gen::<f64>() < p {
            lattice.flip(i, j);
            self.accepted += 1;
            true
        } else {
            false
        }
    }

    /// `n_steps` consecutive single-spin-flip attempts.
    pub fn run<R: Rng + ?Sized>(&mut self, lattice: &mut Lattice, rng: &mut R, n_steps: usize) {
        for _ in 0..n_steps {
            self.step(lattice, rng);
        }
    }

    /// Fraction of attempts accepted so far, 0 before the first attempt.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn checkerboard(size: usize) -> Lattice {
        let spins = (0..size * size)
            .map(|k| if (k / size + k % size) % 2 == 0 { 1 } else { -1 })
            .collect();
        Lattice::from_spins(size, 1.0, spins).unwrap()
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(-8.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(0.0, 1.0), 1.0);
        assert!((acceptance_probability(4.0, 2.0) - (-2.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_downhill_always_accepted() {
        // Every site of a checkerboard has delta_e = -8J.
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let start = checkerboard(4);
        let mut updater = Metropolis::new(0.01, 1.0);
        for _ in 0..1000 {
            let mut lat = start.clone();
            assert!(updater.step(&mut lat, &mut rng));
            assert_eq!(lat.total_energy(), start.total_energy() - 8.0);
        }
        assert_eq!(updater.acceptance_rate(), 1.0);
    }

    #[test]
    fn test_uphill_frozen_at_low_temperature() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);
        let mut lat = Lattice::uniform(4, 1.0, 1).unwrap();
        let mut updater = Metropolis::new(0.01, 1.0);
        updater.run(&mut lat, &mut rng, 10_000);
        assert_eq!(lat.total_magnetization(), 16);
        assert_eq!(updater.acceptance_rate(), 0.0);
    }

    #[test]
    fn test_uphill_acceptance_frequency() {
        // From the ground state every flip costs 8J; at T = 8 it is accepted
        // with probability e^-1.
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let start = Lattice::uniform(4, 1.0, 1).unwrap();
        let mut updater = Metropolis::new(8.0, 1.0);
        let n = 100_000;
        for _ in 0..n {
            let mut lat = start.clone();
            updater.step(&mut lat, &mut rng);
        }
        let expected = (-1.0f64).exp();
        assert!((updater.acceptance_rate() - expected).abs() < 0.01);
    }

    #[test]
    fn test_accepts_matches_boltzmann_factor() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let updater = Metropolis::new(4.0, 1.0);
        let n = 200_000;
        let hits = (0..n).filter(|_| updater.accepts(4.0, &mut rng)).count();
        let freq = hits as f64 / n as f64;
        assert!((freq - (-1.0f64).exp()).abs() < 0.01);
        assert!(updater.accepts(-4.0, &mut rng));
    }

    #[test]
    fn test_zero_energy_flips_always_accepted() {
        // Rows of alternating sign: two aligned and two anti-aligned
        // neighbors everywhere, so h = 0.
        let size = 4;
        let spins = (0..size * size)
            .map(|k| if (k / size) % 2 == 0 { 1 } else { -1 })
            .collect();
        let lat = Lattice::from_spins(size, 1.0, spins).unwrap();
        assert!((0..size).all(|i| lat.energy_contribution(i, 0) == 0));

        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut updater = Metropolis::new(0.5, 1.0);
        for _ in 0..100 {
            let mut trial = lat.clone();
            assert!(updater.step(&mut trial, &mut rng));
        }
    }
}
