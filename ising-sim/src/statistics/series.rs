use tracing::warn;

use super::autocorrelation::{autocorrelation_function, integrated_time};
use super::binning::BinningAccum;
use crate::config::ErrorMethod;

/// Mean of a sampled observable with its statistical error and the
/// correlation time used to inflate that error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub error: f64,
    pub correlation_time: f64,
}

/// Ordered measurements of one observable at one temperature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    values: Vec<f64>,
}

impl SampleSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean, 0 for an empty series.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population variance `(1/M) sum (x - mean)^2`.
    pub fn variance(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.values.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>()
            / self.values.len() as f64
    }

    /// Standard error assuming independent samples, `s / sqrt(M)` with the
    /// unbiased sample deviation `s`.
    pub fn naive_error(&self) -> f64 {
        let m = self.values.len();
        if m < 2 {
            return 0.0;
        }
        (self.variance() / (m - 1) as f64).sqrt()
    }

    /// Every sample equal; the autocorrelation function is undefined.
    pub fn is_constant(&self) -> bool {
        self.values.windows(2).all(|w| w[0] == w[1])
    }

    /// Mean, autocorrelation-aware error and correlation time.
    ///
    /// A constant series yields error 0 and correlation time 0.
    pub fn estimate(&self, method: ErrorMethod, max_lag: usize) -> Estimate {
        let mean = self.mean();
        if self.is_constant() {
            if self.values.len() > 1 {
                warn!(mean, samples = self.values.len(), "constant sample series");
            }
            return Estimate {
                mean,
                error: 0.0,
                correlation_time: 0.0,
            };
        }

        match method {
            ErrorMethod::Autocorrelation => {
                let gamma = autocorrelation_function(&self.values, max_lag);
                let tau = integrated_time(&gamma);
                Estimate {
                    mean,
                    error: self.naive_error() * (2.0 * tau + 1.0).sqrt(),
                    correlation_time: tau,
                }
            }
            ErrorMethod::Binning => {
                let mut accum = BinningAccum::for_len(self.values.len());
                for &v in &self.values {
                    accum.push(v);
                }
                let errors = accum.errors();
                Estimate {
                    mean: accum.mean(),
                    error: *errors.last().unwrap_or(&0.0),
                    correlation_time: BinningAccum::correlation_time(&errors),
                }
            }
        }
    }
}

impl FromIterator<f64> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
