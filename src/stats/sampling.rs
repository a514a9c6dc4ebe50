use rand::Rng;
use serde::Serialize;

use crate::error::DurationError;
use crate::stats::descriptive::mean;
use crate::stats::distribution::{fit_normal, NormalFit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CltSummary {
    pub sample_size: usize,
    pub simulations: usize,
    pub population_mean: f64,
    pub mean_of_sample_means: f64,
    /// `population_mean - mean_of_sample_means`.
    pub difference: f64,
    pub normal_fit: NormalFit,
    #[serde(skip)]
    pub sample_means: Vec<f64>,
}

/// Draws `amount` distinct values from `values`, in sampling order.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    values: &[f64],
    amount: usize,
    rng: &mut R,
) -> Result<Vec<f64>, DurationError> {
    if amount > values.len() {
        return Err(DurationError::InsufficientSamples {
            requested: amount,
            available: values.len(),
        });
    }
    Ok(rand::seq::index::sample(rng, values.len(), amount)
        .into_iter()
        .map(|index| values[index])
        .collect())
}

/// Repeatedly averages samples of `sample_size` values drawn without
/// replacement and fits a normal distribution to the resulting means.
pub fn simulate_sample_means<R: Rng + ?Sized>(
    values: &[f64],
    sample_size: usize,
    simulations: usize,
    rng: &mut R,
) -> Result<CltSummary, DurationError> {
    if sample_size == 0 || simulations == 0 {
        return Err(DurationError::invalid_input(
            "sample size and simulation count must be positive",
        ));
    }

    let mut sample_means = Vec::with_capacity(simulations);
    for _ in 0..simulations {
        let sample = sample_without_replacement(values, sample_size, rng)?;
        sample_means.push(mean(&sample));
    }

    let population_mean = mean(values);
    let mean_of_sample_means = mean(&sample_means);
    let normal_fit = fit_normal(&sample_means)?;
    tracing::debug!(
        sample_size,
        simulations,
        population_mean,
        mean_of_sample_means,
        "simulated sample means"
    );

    Ok(CltSummary {
        sample_size,
        simulations,
        population_mean,
        mean_of_sample_means,
        difference: population_mean - mean_of_sample_means,
        normal_fit,
        sample_means,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn sampling_draws_distinct_positions() {
        let values: Vec<f64> = (0..20).map(f64::from).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut sample = sample_without_replacement(&values, 20, &mut rng).expect("sample");
        sample.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(sample, values);
    }

    #[test]
    fn sampling_is_reproducible_with_a_seed() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        let first = sample_without_replacement(&values, 5, &mut StdRng::seed_from_u64(42));
        let second = sample_without_replacement(&values, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(first.expect("first"), second.expect("second"));
    }

    #[test]
    fn oversampling_is_insufficient_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_without_replacement(&[1.0, 2.0], 3, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DurationError::InsufficientSamples {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn full_population_samples_have_zero_difference() {
        let values = [0.1, 0.2, 0.3, 0.4];
        let mut rng = StdRng::seed_from_u64(3);
        let summary = simulate_sample_means(&values, 4, 10, &mut rng).expect("simulate");
        assert_eq!(summary.sample_means.len(), 10);
        assert!(summary.difference.abs() < 1e-12);
        assert!(summary.normal_fit.sigma < 1e-12);
    }

    #[test]
    fn sample_means_center_on_population_mean() {
        let values: Vec<f64> = (1..=200).map(|value| f64::from(value) / 1000.0).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let summary = simulate_sample_means(&values, 50, 1000, &mut rng).expect("simulate");
        assert!((summary.population_mean - 0.1005).abs() < 1e-12);
        assert!(summary.difference.abs() < 0.005);
    }

    #[test]
    fn simulation_propagates_insufficient_samples() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = simulate_sample_means(&[1.0; 10], 50, 1, &mut rng);
        assert!(matches!(result, Err(DurationError::InsufficientSamples { .. })));
    }
}
