pub mod grid;

pub use grid::{SquareGrid, N_DIMS, N_NEIGHBORS};
