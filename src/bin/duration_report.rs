use std::path::PathBuf;

use clap::Parser;
use mfa_durations::config::DEFAULT_DATA_DIR;
use mfa_durations::report::{build_duration_report, write_json_report};
use mfa_durations::{build_phone_dataset, AnalysisConfig, DatasetLayout, DurationExtractor};

#[path = "common/rng.rs"]
mod rng;
#[path = "common/tracing_setup.rs"]
mod tracing_setup;

/// Vowel duration distribution of one language: writes `stat_data.csv`
/// and `duration_report.json` under `{dir}/{lang}/`.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "MFA_DURATIONS_DIR", default_value = DEFAULT_DATA_DIR)]
    dir: PathBuf,
    #[arg(long, env = "MFA_DURATIONS_LANG")]
    lang: String,
    /// Number of values averaged per simulated sample.
    #[arg(long, env = "MFA_DURATIONS_CLT_SAMPLE_SIZE", default_value_t = AnalysisConfig::default().clt_sample_size)]
    clt_sample_size: usize,
    #[arg(long, env = "MFA_DURATIONS_SIMULATIONS", default_value_t = AnalysisConfig::default().clt_simulations)]
    simulations: usize,
    #[arg(long, env = "MFA_DURATIONS_SEED")]
    seed: Option<u64>,
    #[arg(long, env = "MFA_DURATIONS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    tracing_setup::init_tracing(&args.log_level)?;

    let layout = DatasetLayout::new(&args.dir, &args.lang);
    let extractor = DurationExtractor::default();
    let dataset = build_phone_dataset(&extractor, &layout)
        .map_err(|err| format!("Failed to build stat data for '{}': {err}", args.lang))?;
    println!("Vowel rows: {}", dataset.vowel_durations().len());

    let config = AnalysisConfig {
        clt_sample_size: args.clt_sample_size,
        clt_simulations: args.simulations,
        ..AnalysisConfig::default()
    };
    let mut rng = rng::simulation_rng(args.seed);
    let report = build_duration_report(&dataset, &args.dir, &config, &mut rng)
        .map_err(|err| format!("Failed to analyse vowel durations for '{}': {err}", args.lang))?;

    let fit = &report.lognormal.fit;
    let clt = &report.clt.summary;
    println!("Estimated Parameters: mu={:.4}, sigma={:.4}", fit.mu, fit.sigma);
    println!("Population mean: {:.4}", clt.population_mean);
    println!("Mean of sample means (n={}): {:.4}", clt.sample_size, clt.mean_of_sample_means);
    println!("Difference: {:.6}", clt.difference);

    let out_path = layout.duration_report_json();
    write_json_report(&out_path, &report)
        .map_err(|err| format!("Failed to write report '{}': {err}", out_path.display()))?;
    println!("Wrote {}", layout.stat_data_csv().display());
    println!("Wrote {}", out_path.display());
    Ok(())
}
