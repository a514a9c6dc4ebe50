pub mod classify;
pub mod filter;
pub mod merge;

use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::{interval_duration, read_interval_tier};
use crate::config::{ExtractionConfig, TEXTGRID_EXTENSION};
use crate::error::DurationError;
use crate::types::{Extraction, FileFailure};

/// Files directly inside `dir` whose extension is exactly `TextGrid`,
/// sorted by path.
pub fn list_annotation_files(dir: &Path) -> Result<Vec<PathBuf>, DurationError> {
    let entries =
        fs::read_dir(dir).map_err(|e| DurationError::io("listing annotation directory", dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DurationError::io("reading directory entry", dir, e))?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == TEXTGRID_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name without its extension, used to key rows and metrics.
/// `None` when the stem is not valid UTF-8.
pub fn file_id(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Runs the filter over every annotation file in `dir` and maps each kept
/// interval through `to_row(file_id, label, duration)`.
///
/// Files that fail to read or parse, or whose name is not valid UTF-8, are
/// logged and recorded as failures; a parsed file without the configured
/// tier aborts the whole run.
pub(crate) fn extract_units<T>(
    dir: &Path,
    config: &ExtractionConfig,
    mut to_row: impl FnMut(&str, String, f64) -> T,
) -> Result<Extraction<T>, DurationError> {
    let files = list_annotation_files(dir)?;
    let mut rows = Vec::new();
    let mut failures = Vec::new();
    let mut files_processed = 0usize;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(id) = file_id(path) else {
            tracing::error!(file = %file_name, "skipping annotation file with a non UTF-8 name");
            failures.push(FileFailure {
                file: file_name,
                message: "file name is not valid UTF-8".to_string(),
            });
            continue;
        };

        let intervals = match read_interval_tier(path, &config.tier_name) {
            Ok(Some(intervals)) => intervals,
            Ok(None) => return Err(DurationError::missing_tier(path, &config.tier_name)),
            Err(err) => {
                tracing::error!(file = %file_name, error = %err, "skipping unreadable annotation file");
                failures.push(FileFailure {
                    file: file_name,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let before = rows.len();
        for interval in &intervals {
            let label = filter::normalize_label(config, &interval.text);
            let duration = interval_duration(interval);
            if !filter::accepts_unit(config, &label, duration) {
                continue;
            }
            rows.push(to_row(&id, label, duration));
        }
        files_processed += 1;
        tracing::debug!(
            file = %file_name,
            tier = %config.tier_name,
            kept = rows.len() - before,
            total = intervals.len(),
            "extracted units"
        );
    }

    tracing::info!(
        dir = %dir.display(),
        tier = %config.tier_name,
        files = files_processed,
        skipped = failures.len(),
        rows = rows.len(),
        "extraction complete"
    );

    Ok(Extraction {
        rows,
        files_processed,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::test_support::write_interval_tiers;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mfa_durations_extraction_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn write_phones(dir: &Path, name: &str, intervals: &[(f64, f64, &str)]) {
        let xmax = intervals.last().map(|(_, end, _)| *end).unwrap_or(1.0);
        write_interval_tiers(&dir.join(name), xmax, &[("phones", intervals)]);
    }

    #[test]
    fn lists_only_textgrids_in_sorted_order() {
        let dir = scratch_dir("listing");
        fs::write(dir.join("b.TextGrid"), "").expect("write");
        fs::write(dir.join("a.TextGrid"), "").expect("write");
        fs::write(dir.join("notes.txt"), "").expect("write");
        fs::create_dir_all(dir.join("nested.TextGrid")).expect("mkdir");

        let files = list_annotation_files(&dir).expect("list");
        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TextGrid", "b.TextGrid"]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let dir = scratch_dir("case");
        fs::write(dir.join("lower.textgrid"), "").expect("write");
        fs::write(dir.join("upper.TEXTGRID"), "").expect("write");
        fs::write(dir.join("exact.TextGrid"), "").expect("write");

        let files = list_annotation_files(&dir).expect("list");
        assert_eq!(files, vec![dir.join("exact.TextGrid")]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_id_strips_extension() {
        assert_eq!(
            file_id(Path::new("out/common_voice_fr_123.TextGrid")).as_deref(),
            Some("common_voice_fr_123")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_recorded_as_failure() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = scratch_dir("non_utf8");
        write_phones(&dir, "utt1.TextGrid", &[(0.0, 0.1, "b")]);
        let name = OsStr::from_bytes(b"utt\xff.TextGrid");
        if fs::write(dir.join(name), "").is_err() {
            // Some filesystems refuse non UTF-8 names.
            let _ = fs::remove_dir_all(&dir);
            return;
        }
        assert_eq!(file_id(&dir.join(name)), None);

        let extraction = extract_units(&dir, &ExtractionConfig::phones(), |id, label, _| {
            format!("{id}:{label}")
        })
        .expect("extract");
        assert_eq!(extraction.rows, vec!["utt1:b"]);
        assert_eq!(extraction.files_processed, 1);
        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(extraction.failures[0].file, "utt\u{FFFD}.TextGrid");
        assert!(extraction.failures[0].message.contains("UTF-8"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rows_keep_file_order_and_interval_order() {
        let dir = scratch_dir("order");
        write_phones(&dir, "utt2.TextGrid", &[(0.0, 0.1, "o")]);
        write_phones(&dir, "utt1.TextGrid", &[(0.0, 0.1, "b"), (0.1, 0.3, "a")]);

        let extraction = extract_units(&dir, &ExtractionConfig::phones(), |id, label, _| {
            format!("{id}:{label}")
        })
        .expect("extract");
        assert_eq!(extraction.rows, vec!["utt1:b", "utt1:a", "utt2:o"]);
        assert_eq!(extraction.files_processed, 2);
        assert!(extraction.failures.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_tier_aborts() {
        let dir = scratch_dir("missing_tier");
        write_interval_tiers(
            &dir.join("utt.TextGrid"),
            1.0,
            &[("words", &[(0.0, 1.0, "oui")])],
        );

        let err = extract_units(&dir, &ExtractionConfig::phones(), |_, label, _| label)
            .unwrap_err();
        assert!(matches!(err, DurationError::MissingTier { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("mfa_durations_extraction_does_not_exist");
        let result = extract_units(&dir, &ExtractionConfig::phones(), |_, label, _| label);
        assert!(matches!(result, Err(DurationError::Io { .. })));
    }
}
