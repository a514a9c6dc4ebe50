//! Sampling a speech corpus into an aligner input directory: one 16 kHz
//! mono `.wav` and one `.lab` transcript per utterance.

pub mod metadata;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CorpusPrepConfig;
use crate::error::DurationError;
use crate::pipeline::defaults::{FfmpegTranscoder, PinyinRomanizer};
use crate::pipeline::traits::{Transcoder, TranscriptRomanizer};
use crate::types::FileFailure;

pub use metadata::{read_metadata, sample_rows, utterance_id, MetadataRow};

pub const MANDARIN: &str = "zh";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedUtterance {
    pub id: String,
    pub wav_path: PathBuf,
    pub lab_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusPrepSummary {
    pub lang: String,
    pub output_dir: PathBuf,
    pub sampled: usize,
    pub prepared: usize,
    pub failures: Vec<FileFailure>,
}

/// Keeps the whitespace-separated tokens of a romanized Mandarin transcript
/// that are entirely alphanumeric, so tone digits pass and any token with
/// punctuation attached is dropped whole
/// (`shang4 hai3 ， ni3 hao3` becomes `shang4 hai3 ni3 hao3`).
pub fn filter_mandarin_tokens(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| token.chars().all(char::is_alphanumeric))
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct CorpusPreparer {
    config: CorpusPrepConfig,
    transcoder: Box<dyn Transcoder>,
    romanizer: Box<dyn TranscriptRomanizer>,
}

impl CorpusPreparer {
    pub fn new(config: CorpusPrepConfig) -> Self {
        let transcoder = FfmpegTranscoder::new(config.sample_rate_hz, config.channels);
        Self {
            config,
            transcoder: Box::new(transcoder),
            romanizer: Box::new(PinyinRomanizer),
        }
    }

    pub fn with_transcoder(mut self, transcoder: Box<dyn Transcoder>) -> Self {
        self.transcoder = transcoder;
        self
    }

    pub fn with_romanizer(mut self, romanizer: Box<dyn TranscriptRomanizer>) -> Self {
        self.romanizer = romanizer;
        self
    }

    pub fn config(&self) -> &CorpusPrepConfig {
        &self.config
    }

    pub fn sample(&self, rows: &[MetadataRow]) -> Vec<MetadataRow> {
        sample_rows(rows, self.config.sample_size, self.config.seed)
    }

    /// Transcript as written to the `.lab` file.
    pub fn lab_text(&self, lang: &str, text: &str) -> String {
        if lang == MANDARIN {
            filter_mandarin_tokens(&self.romanizer.romanize(lang, text))
        } else {
            self.romanizer.romanize(lang, text)
        }
    }

    pub fn prepare_utterance(
        &self,
        row: &MetadataRow,
        lang: &str,
        wav_root: &Path,
        lang_out: &Path,
    ) -> Result<PreparedUtterance, DurationError> {
        let source = wav_root.join(&row.file_path);
        if !source.is_file() {
            return Err(DurationError::transcode(&source, "source audio not found"));
        }

        let id = utterance_id(&row.file_path);
        let wav_path = lang_out.join(format!("{id}.wav"));
        let lab_path = lang_out.join(format!("{id}.lab"));

        self.transcoder.transcode(&source, &wav_path)?;
        fs::write(&lab_path, self.lab_text(lang, &row.text))
            .map_err(|e| DurationError::io("writing transcript", &lab_path, e))?;

        Ok(PreparedUtterance {
            id,
            wav_path,
            lab_path,
        })
    }

    /// Samples `rows` and prepares each one under `{out_dir}/{lang}/`.
    ///
    /// A row that fails is logged and counted; the batch carries on.
    /// `on_row` is called once per sampled row.
    pub fn prepare(
        &self,
        lang: &str,
        rows: &[MetadataRow],
        wav_root: &Path,
        out_dir: &Path,
        mut on_row: impl FnMut(),
    ) -> Result<CorpusPrepSummary, DurationError> {
        let lang_out = out_dir.join(lang);
        fs::create_dir_all(&lang_out)
            .map_err(|e| DurationError::io("creating corpus output directory", &lang_out, e))?;

        let sampled = self.sample(rows);
        tracing::info!(
            lang,
            available = rows.len(),
            sampled = sampled.len(),
            seed = self.config.seed,
            "sampled corpus metadata"
        );

        let mut prepared = 0usize;
        let mut failures = Vec::new();
        for row in &sampled {
            match self.prepare_utterance(row, lang, wav_root, &lang_out) {
                Ok(utterance) => {
                    tracing::debug!(id = %utterance.id, "prepared utterance");
                    prepared += 1;
                }
                Err(err) => {
                    tracing::warn!(file = %row.file_path, error = %err, "skipping utterance");
                    failures.push(FileFailure {
                        file: row.file_path.clone(),
                        message: err.to_string(),
                    });
                }
            }
            on_row();
        }

        tracing::info!(
            lang,
            prepared,
            failed = failures.len(),
            out = %lang_out.display(),
            "corpus preparation complete"
        );
        Ok(CorpusPrepSummary {
            lang: lang.to_string(),
            output_dir: lang_out,
            sampled: sampled.len(),
            prepared,
            failures,
        })
    }
}

impl Default for CorpusPreparer {
    fn default() -> Self {
        Self::new(CorpusPrepConfig::default())
    }
}
