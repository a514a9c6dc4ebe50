use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use ffmpeg_sidecar::paths::ffmpeg_path;
use pinyin::ToPinyin;

use crate::config::CorpusPrepConfig;
use crate::corpus::MANDARIN;
use crate::error::DurationError;
use crate::extraction::classify::classify_phone;
use crate::pipeline::traits::{PhoneClassifier, Transcoder, TranscriptRomanizer};
use crate::types::PhoneClass;

pub struct IpaVowelClassifier;

impl PhoneClassifier for IpaVowelClassifier {
    fn classify(&self, label: &str) -> PhoneClass {
        classify_phone(label)
    }
}

/// Runs `ffmpeg -i SRC -ar RATE -ac CH DST -y -loglevel quiet`.
///
/// The program defaults to the binary `ffmpeg-sidecar` resolves: the one
/// next to the executable when present, otherwise `ffmpeg` on `PATH`.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    sample_rate_hz: u32,
    channels: u16,
}

impl FfmpegTranscoder {
    pub fn new(sample_rate_hz: u32, channels: u16) -> Self {
        Self {
            program: ffmpeg_path(),
            sample_rate_hz,
            channels,
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub(crate) fn arguments(&self, source: &Path, destination: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-ar".to_string(),
            self.sample_rate_hz.to_string(),
            "-ac".to_string(),
            self.channels.to_string(),
            destination.to_string_lossy().into_owned(),
            "-y".to_string(),
            "-loglevel".to_string(),
            "quiet".to_string(),
        ]
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        let config = CorpusPrepConfig::default();
        Self::new(config.sample_rate_hz, config.channels)
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, source: &Path, destination: &Path) -> Result<(), DurationError> {
        let status = Command::new(&self.program)
            .args(self.arguments(source, destination))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                DurationError::transcode(
                    source,
                    format!("failed to launch '{}': {e}", self.program.display()),
                )
            })?;
        if !status.success() {
            return Err(DurationError::transcode(
                source,
                format!("'{}' exited with {status}", self.program.display()),
            ));
        }
        Ok(())
    }
}

/// Numbered-tone pinyin for Mandarin transcripts (`你好` becomes `ni3 hao3`,
/// neutral tones get a `5`). Other languages pass through unchanged.
///
/// Runs of non-Han characters are kept as one token each so the Mandarin
/// token filter can drop punctuation afterwards.
pub struct PinyinRomanizer;

impl TranscriptRomanizer for PinyinRomanizer {
    fn romanize(&self, lang: &str, text: &str) -> String {
        if lang != MANDARIN {
            return text.to_string();
        }
        let mut tokens = Vec::new();
        let mut other = String::new();
        for ch in text.chars() {
            match ch.to_pinyin() {
                Some(pinyin) => {
                    flush_run(&mut other, &mut tokens);
                    tokens.push(tone3_syllable(pinyin.with_tone_num_end()));
                }
                None => other.push(ch),
            }
        }
        flush_run(&mut other, &mut tokens);
        tokens.join(" ")
    }
}

fn flush_run(run: &mut String, tokens: &mut Vec<String>) {
    let trimmed = run.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
    run.clear();
}

/// `lü4` → `lv4`, `de` → `de5`.
fn tone3_syllable(numbered: &str) -> String {
    let mut syllable = numbered.replace('ü', "v");
    if !syllable.ends_with(|c: char| c.is_ascii_digit()) {
        syllable.push('5');
    }
    syllable
}
