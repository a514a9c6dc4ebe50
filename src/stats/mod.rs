//! Descriptive statistics, distribution fits and the hypothesis tests run
//! over extracted durations.

pub mod descriptive;
pub mod distribution;
pub mod hypothesis;
pub mod regression;
pub mod sampling;

pub use descriptive::{histogram_density, DurationSummary, HistogramBin};
pub use distribution::{fit_lognormal, fit_normal, LogNormalFit, NormalFit};
pub use hypothesis::{paired_comparison, PairedComparison};
pub use regression::{group_mean_by_length, linear_regression, LengthGroup, LinearFit};
pub use sampling::{sample_without_replacement, simulate_sample_means, CltSummary};
