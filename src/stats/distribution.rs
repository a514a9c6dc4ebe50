use std::f64::consts::PI;

use serde::Serialize;

use crate::error::DurationError;
use crate::stats::descriptive::{mean, std_dev};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalFit {
    pub mu: f64,
    pub sigma: f64,
}

impl NormalFit {
    pub fn pdf(&self, x: f64) -> f64 {
        if self.sigma <= 0.0 {
            return 0.0;
        }
        let z = (x - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (self.sigma * (2.0 * PI).sqrt())
    }
}

/// Log-normal with location fixed at zero.
///
/// `shape` is the standard deviation of `ln x` and `scale` is `exp(mu)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogNormalFit {
    pub mu: f64,
    pub sigma: f64,
    pub shape: f64,
    pub scale: f64,
}

impl LogNormalFit {
    pub fn from_params(mu: f64, sigma: f64) -> Self {
        Self {
            mu,
            sigma,
            shape: sigma,
            scale: mu.exp(),
        }
    }

    pub fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || self.sigma <= 0.0 {
            return 0.0;
        }
        let z = (x.ln() - self.mu) / self.sigma;
        (-0.5 * z * z).exp() / (x * self.sigma * (2.0 * PI).sqrt())
    }

    pub fn mean(&self) -> f64 {
        (self.mu + self.sigma * self.sigma / 2.0).exp()
    }

    pub fn median(&self) -> f64 {
        self.scale
    }
}

/// Maximum-likelihood normal fit; `sigma` is the population standard deviation.
pub fn fit_normal(values: &[f64]) -> Result<NormalFit, DurationError> {
    if values.is_empty() {
        return Err(DurationError::invalid_input(
            "normal fit needs at least one value",
        ));
    }
    Ok(NormalFit {
        mu: mean(values),
        sigma: std_dev(values, 0),
    })
}

/// Maximum-likelihood log-normal fit with the location pinned at zero.
pub fn fit_lognormal(values: &[f64]) -> Result<LogNormalFit, DurationError> {
    if values.len() < 2 {
        return Err(DurationError::invalid_input(format!(
            "log-normal fit needs at least 2 values, got {}",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|value| !(value.is_finite() && **value > 0.0)) {
        return Err(DurationError::invalid_input(format!(
            "log-normal fit needs strictly positive values, got {bad}"
        )));
    }

    let logs: Vec<f64> = values.iter().map(|value| value.ln()).collect();
    Ok(LogNormalFit::from_params(mean(&logs), std_dev(&logs, 0)))
}

/// `points` evenly spaced `(x, pdf(x))` pairs over `[low, high]`.
pub fn sample_curve(low: f64, high: f64, points: usize, pdf: impl Fn(f64) -> f64) -> Vec<[f64; 2]> {
    match points {
        0 => Vec::new(),
        1 => vec![[low, pdf(low)]],
        _ => {
            let step = (high - low) / (points - 1) as f64;
            (0..points)
                .map(|index| {
                    let x = low + step * index as f64;
                    [x, pdf(x)]
                })
                .collect()
        }
    }
}
