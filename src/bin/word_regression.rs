use std::path::PathBuf;

use clap::Parser;
use mfa_durations::config::DEFAULT_DATA_DIR;
use mfa_durations::dataset::load_words;
use mfa_durations::report::{build_regression_report, write_json_report};
use mfa_durations::{AnalysisConfig, DatasetLayout, DurationExtractor};

#[path = "common/tracing_setup.rs"]
mod tracing_setup;

/// Linear regression of mean word duration on word length.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "MFA_DURATIONS_DIR", default_value = DEFAULT_DATA_DIR)]
    dir: PathBuf,
    #[arg(long, env = "MFA_DURATIONS_LANG", default_value = "fr")]
    lang: String,
    /// Word lengths seen this many times or fewer are left out.
    #[arg(long, env = "MFA_DURATIONS_MIN_GROUP_SIZE", default_value_t = AnalysisConfig::default().min_group_size)]
    min_group_size: usize,
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
    let words = load_words(&DurationExtractor::default(), &layout)
        .map_err(|err| format!("Failed to extract words for '{}': {err}", args.lang))?;

    let config = AnalysisConfig {
        min_group_size: args.min_group_size,
        ..AnalysisConfig::default()
    };
    let report = build_regression_report(&args.lang, &words, &args.dir, &config)
        .map_err(|err| format!("Failed to fit word regression for '{}': {err}", args.lang))?;

    let fit = &report.fit;
    println!("Slope: {:.4} s/char", fit.slope);
    println!("Intercept: {:.4} s", fit.intercept);
    println!("R²: {:.4}", fit.r_squared);
    if let Some(std_err) = fit.std_err {
        println!("Std err: {std_err:.4}");
    }

    let out_path = layout.word_regression_json();
    write_json_report(&out_path, &report)
        .map_err(|err| format!("Failed to write report '{}': {err}", out_path.display()))?;
    println!("Wrote {}", out_path.display());
    Ok(())
}
