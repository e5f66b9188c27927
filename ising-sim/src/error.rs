use std::path::PathBuf;

use thiserror::Error;
use validator::ValidationErrors;

/// Failures surfaced by the simulation library.
#[derive(Debug, Error)]
pub enum SimError {
    /// A precondition on the run parameters does not hold. Raised before any
    /// Monte Carlo work starts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationErrors),

    /// An explicit spin grid was rejected.
    #[error("invalid lattice: {0}")]
    InvalidLattice(String),

    /// The interrupt flag was raised while simulating `temperature`.
    #[error("interrupted while simulating T = {temperature}")]
    Interrupted { temperature: f64 },

    #[error("failed to read configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
