use std::path::Path;

use crate::error::DurationError;
use crate::types::PhoneClass;

pub trait PhoneClassifier: Send + Sync {
    fn classify(&self, label: &str) -> PhoneClass;
}

/// Converts one source audio file into the aligner's input format.
pub trait Transcoder: Send + Sync {
    fn transcode(&self, source: &Path, destination: &Path) -> Result<(), DurationError>;
}

/// Rewrites a transcript into the script the acoustic model expects
/// (for example pinyin with tone numbers for Mandarin).
pub trait TranscriptRomanizer: Send + Sync {
    fn romanize(&self, lang: &str, text: &str) -> String;
}
