use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::dataset::PhoneDataset;
use crate::error::DurationError;
use crate::stats::descriptive::sorted_copy;
use crate::stats::distribution::sample_curve;
use crate::stats::regression::regress_duration_on_length;
use crate::stats::{
    fit_lognormal, group_mean_by_length, histogram_density, paired_comparison,
    simulate_sample_means, CltSummary, DurationSummary, HistogramBin, LengthGroup, LinearFit,
    LogNormalFit, PairedComparison,
};
use crate::types::{Extraction, FileFailure, WordUnit};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub data_dir: String,
    pub files_processed: usize,
    pub files_skipped: Vec<FileFailure>,
}

impl Meta {
    pub fn now(data_dir: &Path, files_processed: usize, files_skipped: Vec<FileFailure>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            data_dir: data_dir.to_string_lossy().into_owned(),
            files_processed,
            files_skipped,
        }
    }
}

/// `[x, density]` pairs of a fitted distribution.
pub type DensityCurve = Vec<[f64; 2]>;

#[derive(Debug, Clone, Serialize)]
pub struct LogNormalSection {
    pub fit: LogNormalFit,
    pub curve: DensityCurve,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CltSection {
    #[serde(flatten)]
    pub summary: CltSummary,
    pub normal_curve: DensityCurve,
    pub histogram: Vec<HistogramBin>,
}

/// Vowel duration distribution of one language.
#[derive(Debug, Clone, Serialize)]
pub struct DurationReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub lang: String,
    pub stat_rows: usize,
    pub vowels: DurationSummary,
    pub consonants: DurationSummary,
    pub lognormal: LogNormalSection,
    pub clt: CltSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageSide {
    pub lang: String,
    pub stat_rows: usize,
    pub files_processed: usize,
    pub files_skipped: Vec<FileFailure>,
    pub vowels: DurationSummary,
}

impl LanguageSide {
    fn from_dataset(dataset: &PhoneDataset) -> Self {
        Self {
            lang: dataset.lang.clone(),
            stat_rows: dataset.table.len(),
            files_processed: dataset.files_processed,
            files_skipped: dataset.failures.clone(),
            vowels: DurationSummary::from_values(&dataset.vowel_durations()),
        }
    }
}

/// Paired comparison of two languages' vowel durations, `first - second`.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub schema_version: u32,
    pub generated_at: String,
    pub data_dir: String,
    pub first: LanguageSide,
    pub second: LanguageSide,
    pub comparison: PairedComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegressionReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub lang: String,
    pub words: usize,
    pub min_group_size: usize,
    pub groups: Vec<LengthGroup>,
    pub fit: LinearFit,
}

/// Log-normal MLE of the vowel durations plus the sample-mean simulation.
pub fn build_duration_report<R: Rng + ?Sized>(
    dataset: &PhoneDataset,
    data_dir: &Path,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<DurationReport, DurationError> {
    let vowels = dataset.vowel_durations();
    let fit = fit_lognormal(&vowels)?;
    tracing::info!(
        lang = %dataset.lang,
        vowels = vowels.len(),
        mu = fit.mu,
        sigma = fit.sigma,
        "fitted log-normal to vowel durations"
    );

    let clt = simulate_sample_means(&vowels, config.clt_sample_size, config.clt_simulations, rng)?;
    let sorted_means = sorted_copy(&clt.sample_means);
    let (low, high) = match (sorted_means.first(), sorted_means.last()) {
        (Some(low), Some(high)) => (*low, *high),
        _ => (clt.population_mean, clt.population_mean),
    };
    let normal = clt.normal_fit;
    let clt_section = CltSection {
        normal_curve: sample_curve(low, high, config.curve_points, |x| normal.pdf(x)),
        histogram: histogram_density(&clt.sample_means, config.means_histogram_bins)?,
        summary: clt,
    };
    tracing::info!(
        lang = %dataset.lang,
        population_mean = clt_section.summary.population_mean,
        mean_of_sample_means = clt_section.summary.mean_of_sample_means,
        difference = clt_section.summary.difference,
        "simulated sample means"
    );

    Ok(DurationReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta::now(data_dir, dataset.files_processed, dataset.failures.clone()),
        lang: dataset.lang.clone(),
        stat_rows: dataset.table.len(),
        vowels: DurationSummary::from_values(&vowels),
        consonants: DurationSummary::from_values(&dataset.consonant_durations()),
        lognormal: LogNormalSection {
            curve: sample_curve(0.0, config.curve_max_secs, config.curve_points, |x| fit.pdf(x)),
            histogram: histogram_density(&vowels, config.duration_histogram_bins)?,
            fit,
        },
        clt: clt_section,
    })
}

pub fn build_comparison_report<R: Rng + ?Sized>(
    first: &PhoneDataset,
    second: &PhoneDataset,
    data_dir: &Path,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<ComparisonReport, DurationError> {
    let comparison = paired_comparison(
        &first.vowel_durations(),
        &second.vowel_durations(),
        config.comparison_sample_size,
        rng,
    )?;
    tracing::info!(
        first = %first.lang,
        second = %second.lang,
        n = comparison.sample_size,
        z_bar = comparison.z_bar,
        s_z = comparison.s_z,
        t = comparison.t_statistic,
        f = comparison.f_statistic,
        "paired vowel duration comparison"
    );

    Ok(ComparisonReport {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        data_dir: data_dir.to_string_lossy().into_owned(),
        first: LanguageSide::from_dataset(first),
        second: LanguageSide::from_dataset(second),
        comparison,
    })
}

pub fn build_regression_report(
    lang: &str,
    words: &Extraction<WordUnit>,
    data_dir: &Path,
    config: &AnalysisConfig,
) -> Result<RegressionReport, DurationError> {
    let groups = group_mean_by_length(&words.rows, config.min_group_size);
    let fit = regress_duration_on_length(&groups)?;
    tracing::info!(
        lang,
        words = words.rows.len(),
        groups = groups.len(),
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        "regressed word duration on length"
    );

    Ok(RegressionReport {
        schema_version: SCHEMA_VERSION,
        meta: Meta::now(data_dir, words.files_processed, words.failures.clone()),
        lang: lang.to_string(),
        words: words.rows.len(),
        min_group_size: config.min_group_size,
        groups,
        fit,
    })
}

pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), DurationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| DurationError::io("creating report output directory", parent, e))?;
    }

    let mut file =
        File::create(path).map_err(|e| DurationError::io("creating report file", path, e))?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|e| DurationError::json("serializing report", e))?;
    file.write_all(b"\n")
        .map_err(|e| DurationError::io("finalizing report file", path, e))?;
    Ok(())
}
