/// Self-consistent window factor: summation stops once `lag >= c * tau_int`.
const SOKAL_WINDOW: f64 = 5.0;

/// Normalized autocorrelation function Γ(δ) for `δ = 0..=max_lag`.
///
/// `Γ(δ) = <(o_t - ō)(o_{t+δ} - ō)> / var(o)`, where the average runs over the
/// `M - δ` available pairs. Lags beyond `M - 1` are dropped. A series with zero
/// variance returns `[1.0]` followed by zeros.
pub fn autocorrelation_function(series: &[f64], max_lag: usize) -> Vec<f64> {
    let m = series.len();
    if m == 0 {
        return vec![1.0];
    }
    let max_lag = max_lag.min(m - 1);

    let mean = series.iter().sum::<f64>() / m as f64;
    let centered: Vec<f64> = series.iter().map(|&o| o - mean).collect();
    let var = centered.iter().map(|&c| c * c).sum::<f64>() / m as f64;

    (0..=max_lag)
        .map(|delta| {
            if var <= 0.0 {
                return if delta == 0 { 1.0 } else { 0.0 };
            }
            let count = (m - delta) as f64;
            let prod: f64 = centered[..m - delta]
                .iter()
                .zip(&centered[delta..])
                .map(|(a, b)| a * b)
                .sum();
            prod / count / var
        })
        .collect()
}

/// Integrated autocorrelation time `tau = sum_{δ>=1} Γ(δ)`.
///
/// The sum stops before the first non-positive Γ(δ), once the window reaches
/// `SOKAL_WINDOW * (tau + 1/2)`, or at the end of `gamma`. The statistical
/// error of a mean is then `sqrt(2 tau + 1)` times the naive one.
pub fn integrated_time(gamma: &[f64]) -> f64 {
    let mut tau_int = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        if g <= 0.0 {
            break;
        }
        tau_int += g;
        if w as f64 >= SOKAL_WINDOW * tau_int {
            break;
        }
    }
    tau_int - 0.5
}
