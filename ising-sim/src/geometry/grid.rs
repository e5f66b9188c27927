/// Periodic `size x size` square grid with a precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `(i, j)` has flat index
/// `i * size + j`. Both dimensions wrap around, so every site has exactly four
/// nearest neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareGrid {
    /// Extent along each of the two dimensions.
    pub size: usize,
    /// Total number of sites (`size * size`).
    pub n_sites: usize,
    /// Layout: `neighbors[(i * 2 + d) * 2 + dir]` where `d` is the dimension
    /// (0 = rows, 1 = columns) and `dir = 0` is forward, `dir = 1` backward.
    neighbors: Vec<u32>,
}

/// Number of spatial dimensions of the square grid.
pub const N_DIMS: usize = 2;

/// Coordination number of the square grid.
pub const N_NEIGHBORS: usize = 2 * N_DIMS;

impl SquareGrid {
    pub fn new(size: usize) -> Self {
        let n_sites = size * size;
        let mut neighbors = vec![0u32; n_sites * N_NEIGHBORS];

        for flat in 0..n_sites {
            let coords = [flat / size, flat % size];
            for d in 0..N_DIMS {
                for (dir, sign) in [(0, 1isize), (1, -1isize)] {
                    let mut moved = coords;
                    moved[d] = (coords[d] as isize + sign).rem_euclid(size as isize) as usize;
                    neighbors[(flat * N_DIMS + d) * 2 + dir] = (moved[0] * size + moved[1]) as u32;
                }
            }
        }

        Self {
            size,
            n_sites,
            neighbors,
        }
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    /// Return the neighbor of site `flat_idx` in dimension `dim`.
    /// `forward = true` means +1 direction, `forward = false` means -1 direction.
    #[inline]
    pub fn neighbor(&self, flat_idx: usize, dim: usize, forward: bool) -> usize {
        self.neighbors[(flat_idx * N_DIMS + dim) * 2 + (!forward as usize)] as usize
    }

    /// All four neighbors of `flat_idx`, forward and backward per dimension.
    #[inline]
    pub fn neighbors_of(&self, flat_idx: usize) -> &[u32] {
        let base = flat_idx * N_NEIGHBORS;
        &self.neighbors[base..base + N_NEIGHBORS]
    }
}
