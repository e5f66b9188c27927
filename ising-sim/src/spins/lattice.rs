use rand::Rng;

use crate::error::SimError;
use crate::geometry::{SquareGrid, N_DIMS};

/// At N = 1 the single site is its own neighbor and `2 J s h` no longer is the
/// flip cost.
fn check_size(size: usize) -> Result<(), SimError> {
    if size < 2 {
        return Err(SimError::InvalidLattice(format!(
            "lattice size must be >= 2, got {size}"
        )));
    }
    Ok(())
}

/// Spin configuration on a periodic square lattice.
///
/// Spins are `i8` values `+1`/`-1`, stored row-major. The total magnetization
/// and the forward bond sum `sum_i sum_d s_i s_{i+d}` are cached and updated
/// on every flip, so measuring is O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    grid: SquareGrid,
    spins: Vec<i8>,
    coupling: f64,
    magnetization: i64,
    bond_sum: i64,
}

impl Lattice {
    /// Each spin independently `+1` or `-1` with probability 1/2.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        coupling: f64,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        check_size(size)?;
        let spins = (0..size * size)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Ok(Self::assemble(SquareGrid::new(size), spins, coupling))
    }

    /// Fully aligned lattice with every spin equal to `spin`.
    pub fn uniform(size: usize, coupling: f64, spin: i8) -> Result<Self, SimError> {
        Self::from_spins(size, coupling, vec![spin; size * size])
    }

    /// Build a lattice from explicit row-major spins.
    pub fn from_spins(size: usize, coupling: f64, spins: Vec<i8>) -> Result<Self, SimError> {
        check_size(size)?;
        if spins.len() != size * size {
            return Err(SimError::InvalidLattice(format!(
                "expected {} spins for a {size}x{size} lattice, got {}",
                size * size,
                spins.len()
            )));
        }
        if let Some(pos) = spins.iter().position(|&s| s != 1 && s != -1) {
            return Err(SimError::InvalidLattice(format!(
                "spin at index {pos} is {}, expected +1 or -1",
                spins[pos]
            )));
        }
        Ok(Self::assemble(SquareGrid::new(size), spins, coupling))
    }

    fn assemble(grid: SquareGrid, spins: Vec<i8>, coupling: f64) -> Self {
        let mut lattice = Self {
            grid,
            spins,
            coupling,
            magnetization: 0,
            bond_sum: 0,
        };
        lattice.magnetization = lattice.recompute_magnetization();
        lattice.bond_sum = lattice.recompute_bond_sum();
        lattice
    }

    pub fn size(&self) -> usize {
        self.grid.size
    }

    pub fn n_sites(&self) -> usize {
        self.grid.n_sites
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    #[inline]
    pub fn spin(&self, i: usize, j: usize) -> i8 {
        self.spins[self.grid.index(i, j)]
    }

    /// Sum of the four periodic nearest-neighbor spins of site `(i, j)`.
    #[inline]
    pub fn energy_contribution(&self, i: usize, j: usize) -> i32 {
        self.neighbor_sum(self.grid.index(i, j))
    }

    #[inline]
    fn neighbor_sum(&self, flat: usize) -> i32 {
        self.grid
            .neighbors_of(flat)
            .iter()
            .map(|&n| self.spins[n as usize] as i32)
            .sum()
    }

    /// Energy change `2 J s_ij h_ij` if the spin at `(i, j)` were flipped.
    #[inline]
    pub fn flip_energy(&self, i: usize, j: usize) -> f64 {
        2.0 * self.coupling * f64::from(self.spin(i, j)) * f64::from(self.energy_contribution(i, j))
    }

    /// Reverse the spin at `(i, j)` in place.
    pub fn flip(&mut self, i: usize, j: usize) {
        let flat = self.grid.index(i, j);
        let s = self.spins[flat] as i64;
        let h = self.neighbor_sum(flat) as i64;
        self.spins[flat] = -self.spins[flat];
        self.magnetization -= 2 * s;
        self.bond_sum -= 2 * s * h;
    }

    /// Reverse every spin. Leaves the energy unchanged.
    pub fn flip_all(&mut self) {
        for s in self.spins.iter_mut() {
            *s = -*s;
        }
        self.magnetization = -self.magnetization;
    }

    /// `H[s] = -J sum_<ij> s_i s_j` over unique nearest-neighbor bonds.
    pub fn total_energy(&self) -> f64 {
        -self.coupling * self.bond_sum as f64
    }

    /// `sum_i s_i`.
    pub fn total_magnetization(&self) -> i64 {
        self.magnetization
    }

    /// Cached `sum_i sum_d s_i s_{i+d}` over forward bonds.
    pub fn bond_sum(&self) -> i64 {
        self.bond_sum
    }

    pub fn recompute_magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub fn recompute_bond_sum(&self) -> i64 {
        let mut total = 0i64;
        for i in 0..self.grid.n_sites {
            let si = self.spins[i] as i64;
            for d in 0..N_DIMS {
                total += si * self.spins[self.grid.neighbor(i, d, true)] as i64;
            }
        }
        total
    }
}
