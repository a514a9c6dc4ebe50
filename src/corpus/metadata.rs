use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::DurationError;

/// One line of a `file_path|duration|text` metadata file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataRow {
    pub file_path: String,
    pub duration: String,
    pub text: String,
}

pub fn read_metadata(path: &Path) -> Result<Vec<MetadataRow>, DurationError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DurationError::io("opening corpus metadata", path, e))?;
    read_metadata_from(file, path)
}

/// Pipe-delimited, headerless, with quote characters taken literally.
pub fn read_metadata_from<R: Read>(reader: R, source: &Path) -> Result<Vec<MetadataRow>, DurationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);
    csv_reader
        .deserialize::<MetadataRow>()
        .map(|row| row.map_err(|e| DurationError::csv("reading corpus metadata row", source, e)))
        .collect()
}

/// `min(sample_size, rows.len())` distinct rows chosen with a seeded RNG.
pub fn sample_rows(rows: &[MetadataRow], sample_size: usize, seed: u64) -> Vec<MetadataRow> {
    let amount = sample_size.min(rows.len());
    let mut rng = StdRng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, rows.len(), amount)
        .into_iter()
        .map(|index| rows[index].clone())
        .collect()
}

/// Base name of the audio path with every `.` replaced by `_`.
pub fn utterance_id(file_path: &str) -> String {
    let base = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path);
    base.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = "clips/a.mp3|2.1|Hola \"amigo\"\nclips/b.mp3|3.4|Buenos días\nclips/c.mp3|1.0|Adiós\n";

    fn rows() -> Vec<MetadataRow> {
        read_metadata_from(METADATA.as_bytes(), Path::new("metadata.csv")).expect("metadata")
    }

    #[test]
    fn reads_pipe_rows_without_header_or_quoting() {
        let rows = rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].file_path, "clips/a.mp3");
        assert_eq!(rows[0].duration, "2.1");
        assert_eq!(rows[0].text, "Hola \"amigo\"");
    }

    #[test]
    fn short_rows_are_errors() {
        let result = read_metadata_from("only|two\n".as_bytes(), Path::new("m.csv"));
        assert!(matches!(result, Err(DurationError::Csv { .. })));
    }

    #[test]
    fn sample_is_capped_and_seeded() {
        let rows = rows();
        let all = sample_rows(&rows, 500, 42);
        assert_eq!(all.len(), 3);
        let mut paths: Vec<&str> = all.iter().map(|row| row.file_path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["clips/a.mp3", "clips/b.mp3", "clips/c.mp3"]);

        assert_eq!(sample_rows(&rows, 2, 42), sample_rows(&rows, 2, 42));
        assert_eq!(sample_rows(&rows, 2, 42).len(), 2);
    }

    #[test]
    fn utterance_id_uses_base_name() {
        assert_eq!(utterance_id("clips/common_voice_de_1.mp3"), "common_voice_de_1_mp3");
        assert_eq!(utterance_id("x.y.wav"), "x_y_wav");
        assert_eq!(utterance_id(r"dir\sub\z.wav"), "z_wav");
    }
}
