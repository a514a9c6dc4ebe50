use std::cmp::Ordering;

use serde::Serialize;

use crate::error::DurationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub p50: f64,
    pub p90: f64,
    pub max: f64,
}

impl DurationSummary {
    /// Count, mean, sample standard deviation and order statistics of a
    /// duration column. Every statistic but `count` is NaN (`null` in JSON)
    /// when `values` is empty.
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = sorted_copy(values);
        Self {
            count: values.len(),
            mean: mean(values),
            std_dev: std_dev(values, 1),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            p50: median_sorted(&sorted).unwrap_or(f64::NAN),
            p90: quantile_sorted(&sorted, 0.9).unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// One equal-width histogram bin; `density` integrates to 1 over all bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub density: f64,
}

/// Arithmetic mean. NaN for an empty slice, as a pandas column mean is.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (0 population, 1 sample).
/// Zero when there are not more than `ddof` values.
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return 0.0;
    }
    let mu = mean(values);
    let squared: f64 = values.iter().map(|value| (value - mu).powi(2)).sum();
    squared / (values.len() - ddof) as f64
}

pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}

/// Quantile `q` (clamped to `[0, 1]`) of ascending durations, interpolating
/// linearly between the two closest ranks like `numpy.quantile`.
pub fn quantile_sorted(sorted_values: &[f64], q: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let below = rank.floor() as usize;
    let above = (below + 1).min(last);
    let weight = rank - below as f64;
    Some(sorted_values[below] + (sorted_values[above] - sorted_values[below]) * weight)
}

pub fn median_sorted(sorted_values: &[f64]) -> Option<f64> {
    quantile_sorted(sorted_values, 0.5)
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Equal-width bins over `[min, max]`, the last bin closed on the right.
pub fn histogram_density(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>, DurationError> {
    if bins == 0 {
        return Err(DurationError::invalid_input("histogram needs at least one bin"));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(DurationError::invalid_input(
            "histogram values must be finite",
        ));
    }

    let sorted = sorted_copy(values);
    let (low, high) = (sorted[0], sorted[sorted.len() - 1]);
    // All values equal: one unit-width bin centred on the value.
    let (low, high) = if high > low {
        (low, high)
    } else {
        (low - 0.5, high + 0.5)
    };
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - low) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    let total = values.len() as f64;
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| HistogramBin {
            lower: low + index as f64 * width,
            upper: low + (index + 1) as f64 * width,
            count,
            density: count as f64 / (total * width),
        })
        .collect())
}
