use rand::Rng;
use serde::Serialize;

use crate::error::DurationError;
use crate::stats::descriptive::{mean, std_dev, variance};
use crate::stats::sampling::sample_without_replacement;

/// Paired difference and variance-ratio statistics of two equal-size samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedComparison {
    pub sample_size: usize,
    pub mean_first: f64,
    pub mean_second: f64,
    /// Mean of `first[i] - second[i]`.
    pub z_bar: f64,
    /// Sample standard deviation (ddof 1) of the differences.
    pub s_z: f64,
    pub t_statistic: f64,
    pub variance_first: f64,
    pub variance_second: f64,
    pub f_statistic: f64,
}

/// Down-samples `n` values from each side without replacement and compares
/// the pairs position by position.
pub fn paired_comparison<R: Rng + ?Sized>(
    first: &[f64],
    second: &[f64],
    n: usize,
    rng: &mut R,
) -> Result<PairedComparison, DurationError> {
    let first = sample_without_replacement(first, n, rng)?;
    let second = sample_without_replacement(second, n, rng)?;
    paired_statistics(&first, &second)
}

/// Statistics over already paired samples.
///
/// `t = z_bar / (s_z / sqrt(n))` and `F = var(first) / var(second)`; both are
/// infinite or NaN when the denominator is zero.
pub fn paired_statistics(first: &[f64], second: &[f64]) -> Result<PairedComparison, DurationError> {
    if first.len() != second.len() {
        return Err(DurationError::invalid_input(format!(
            "paired samples differ in size: {} vs {}",
            first.len(),
            second.len()
        )));
    }
    let n = first.len();
    if n < 2 {
        return Err(DurationError::invalid_input(
            "paired comparison needs at least 2 pairs",
        ));
    }

    let differences: Vec<f64> = first.iter().zip(second).map(|(a, b)| a - b).collect();
    let z_bar = mean(&differences);
    let s_z = std_dev(&differences, 1);
    let variance_first = variance(first, 1);
    let variance_second = variance(second, 1);

    Ok(PairedComparison {
        sample_size: n,
        mean_first: mean(first),
        mean_second: mean(second),
        z_bar,
        s_z,
        t_statistic: z_bar / (s_z / (n as f64).sqrt()),
        variance_first,
        variance_second,
        f_statistic: variance_first / variance_second,
    })
}
