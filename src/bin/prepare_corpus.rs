use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mfa_durations::config::DEFAULT_CORPUS_OUT_DIR;
use mfa_durations::corpus::read_metadata;
use mfa_durations::pipeline::defaults::FfmpegTranscoder;
use mfa_durations::{CorpusPrepConfig, CorpusPreparer};

#[path = "common/tracing_setup.rs"]
mod tracing_setup;

/// Samples a `file_path|duration|text` metadata file into an aligner input
/// directory of 16 kHz mono `.wav` files and `.lab` transcripts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, env = "MFA_DURATIONS_LANG")]
    lang: String,
    #[arg(long, env = "MFA_DURATIONS_METADATA")]
    metadata: PathBuf,
    /// Directory the metadata `file_path` column is relative to.
    #[arg(long, env = "MFA_DURATIONS_WAV_ROOT")]
    wav_root: PathBuf,
    #[arg(long, env = "MFA_DURATIONS_OUT_DIR", default_value = DEFAULT_CORPUS_OUT_DIR)]
    out_dir: PathBuf,
    #[arg(long, env = "MFA_DURATIONS_SAMPLE_SIZE", default_value_t = CorpusPrepConfig::DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    #[arg(long, env = "MFA_DURATIONS_SEED", default_value_t = CorpusPrepConfig::DEFAULT_SEED)]
    seed: u64,
    /// ffmpeg binary to run instead of the one found next to the executable
    /// or on `PATH`.
    #[arg(long, env = "MFA_DURATIONS_FFMPEG")]
    ffmpeg: Option<PathBuf>,
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

    let rows = read_metadata(&args.metadata).map_err(|err| {
        format!(
            "Failed to read metadata '{}': {err}",
            args.metadata.display()
        )
    })?;
    let config = CorpusPrepConfig {
        sample_size: args.sample_size,
        seed: args.seed,
        ..CorpusPrepConfig::default()
    };
    let mut transcoder = FfmpegTranscoder::new(config.sample_rate_hz, config.channels);
    if let Some(program) = &args.ffmpeg {
        transcoder = transcoder.with_program(program);
    }
    tracing::debug!(ffmpeg = %transcoder.program().display(), "using ffmpeg");
    let preparer = CorpusPreparer::new(config).with_transcoder(Box::new(transcoder));

    println!("Processing {}...", args.lang);
    let progress = ProgressBar::new(args.sample_size.min(rows.len()) as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message(args.lang.clone());

    let summary = preparer
        .prepare(&args.lang, &rows, &args.wav_root, &args.out_dir, || {
            progress.inc(1)
        })
        .map_err(|err| format!("Failed to prepare corpus for '{}': {err}", args.lang))?;
    progress.finish_with_message("done");

    println!(
        "Prepared {}/{} utterances in {}",
        summary.prepared,
        summary.sampled,
        summary.output_dir.display()
    );
    for failure in &summary.failures {
        eprintln!("Skipped {}: {}", failure.file, failure.message);
    }
    Ok(())
}
