use std::path::PathBuf;

use clap::Parser;
use mfa_durations::config::DEFAULT_DATA_DIR;
use mfa_durations::report::{build_comparison_report, write_json_report};
use mfa_durations::{build_phone_dataset, AnalysisConfig, DatasetLayout, DurationExtractor};

#[path = "common/rng.rs"]
mod rng;
#[path = "common/tracing_setup.rs"]
mod tracing_setup;

/// Paired t-statistic and F-statistic of two languages' vowel durations
/// (first minus second).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "MFA_DURATIONS_DIR", default_value = DEFAULT_DATA_DIR)]
    dir: PathBuf,
    /// Exactly two languages; repeat the flag or separate with commas.
    #[arg(
        long = "lang",
        env = "MFA_DURATIONS_LANGS",
        value_delimiter = ',',
        default_values = ["fr", "es"]
    )]
    langs: Vec<String>,
    /// Vowels drawn without replacement from each language.
    #[arg(long, env = "MFA_DURATIONS_SAMPLE_SIZE", default_value_t = AnalysisConfig::default().comparison_sample_size)]
    sample_size: usize,
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

    let [first_lang, second_lang] = args.langs.as_slice() else {
        return Err(format!(
            "Expected exactly two --lang values, got {}",
            args.langs.len()
        ));
    };

    let extractor = DurationExtractor::default();
    let mut datasets = Vec::with_capacity(2);
    for lang in [second_lang, first_lang] {
        let layout = DatasetLayout::new(&args.dir, lang);
        let dataset = build_phone_dataset(&extractor, &layout)
            .map_err(|err| format!("Failed to build stat data for '{lang}': {err}"))?;
        println!("Wrote {}", layout.stat_data_csv().display());
        datasets.push(dataset);
    }
    let (second, first) = (&datasets[0], &datasets[1]);

    let config = AnalysisConfig {
        comparison_sample_size: args.sample_size,
        ..AnalysisConfig::default()
    };
    let mut rng = rng::simulation_rng(args.seed);
    let report = build_comparison_report(first, second, &args.dir, &config, &mut rng)
        .map_err(|err| format!("Failed to compare '{first_lang}' and '{second_lang}': {err}"))?;

    let comparison = &report.comparison;
    println!("Z_bar: {:.4}", comparison.z_bar);
    println!("S_z: {:.4}", comparison.s_z);
    println!("T-statistic: {:.4}", comparison.t_statistic);
    println!(
        "F-statistic (n={}): {:.4}",
        comparison.sample_size, comparison.f_statistic
    );

    let out_path = DatasetLayout::comparison_json(&args.dir, first_lang, second_lang);
    write_json_report(&out_path, &report)
        .map_err(|err| format!("Failed to write report '{}': {err}", out_path.display()))?;
    println!("Wrote {}", out_path.display());
    Ok(())
}
