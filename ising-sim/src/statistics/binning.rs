/// Levels kept below the top when reading off the error: the top levels hold
/// too few bins for a stable variance.
const RESERVED_LEVELS: usize = 6;

/// Streaming binning analysis.
///
/// Level 0 receives every measurement; each time a level has seen an even
/// number of values, the mean of the last pair is pushed one level up. After
/// `2^levels` measurements, level `k` holds `2^(levels - k)` bin means of
/// width `2^k`.
#[derive(Debug, Clone)]
pub struct BinningAccum {
    levels: usize,
    counts: Vec<u64>,
    sums: Vec<f64>,
    sums_sq: Vec<f64>,
    /// Last value pushed at each level while waiting for its partner.
    pending: Vec<f64>,
}

impl BinningAccum {
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            counts: vec![0; levels + 1],
            sums: vec![0.0; levels + 1],
            sums_sq: vec![0.0; levels + 1],
            pending: vec![0.0; levels + 1],
        }
    }

    /// Accumulator with `floor(log2(n))` levels, enough for `n` measurements.
    pub fn for_len(n: usize) -> Self {
        let levels = if n <= 1 { 0 } else { n.ilog2() as usize };
        Self::new(levels)
    }

    pub fn push(&mut self, mut value: f64) {
        for level in 0..=self.levels {
            self.counts[level] += 1;
            self.sums[level] += value;
            self.sums_sq[level] += value * value;
            if self.counts[level] % 2 == 1 {
                self.pending[level] = value;
                return;
            }
            value = (value + self.pending[level]) / 2.0;
        }
    }

    /// `true` once every level has received at least one bin.
    pub fn is_full(&self) -> bool {
        self.counts[0] >= 1u64 << self.levels
    }

    pub fn mean(&self) -> f64 {
        if self.counts[0] == 0 {
            return 0.0;
        }
        self.sums[0] / self.counts[0] as f64
    }

    /// Level at which the error is read: `max(levels - 6, 0)`.
    pub fn error_level(&self) -> usize {
        self.levels.saturating_sub(RESERVED_LEVELS)
    }

    /// Standard error of the mean computed from the bins of each level up to
    /// [`error_level`](Self::error_level). Levels with fewer than two bins
    /// report 0.
    pub fn errors(&self) -> Vec<f64> {
        (0..=self.error_level())
            .map(|level| {
                let n = self.counts[level] as f64;
                if self.counts[level] < 2 {
                    return 0.0;
                }
                let ss = self.sums_sq[level] - self.sums[level] * self.sums[level] / n;
                (ss.max(0.0) / (n * (n - 1.0))).sqrt()
            })
            .collect()
    }

    /// `tau = ((err_top / err_0)^2 - 1) / 2`, 0 when `err_0` vanishes.
    pub fn correlation_time(errors: &[f64]) -> f64 {
        match (errors.first(), errors.last()) {
            (Some(&base), Some(&top)) if base > 0.0 => {
                let ratio = top / base;
                (ratio * ratio - 1.0) / 2.0
            }
            _ => 0.0,
        }
    }
}
