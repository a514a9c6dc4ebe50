use crate::config::DatasetLayout;
use crate::error::DurationError;
use crate::extraction::merge::{merge_phone_metrics, MetricsTable, StatTable};
use crate::pipeline::runtime::DurationExtractor;
use crate::types::{Extraction, FileFailure, PhoneClass, WordUnit};

/// Merged phone table of one language plus what the extraction skipped.
#[derive(Debug, Clone)]
pub struct PhoneDataset {
    pub lang: String,
    pub table: StatTable,
    pub files_processed: usize,
    pub phones_extracted: usize,
    pub failures: Vec<FileFailure>,
}

impl PhoneDataset {
    pub fn vowel_durations(&self) -> Vec<f64> {
        self.table.durations(PhoneClass::Vowel)
    }

    pub fn consonant_durations(&self) -> Vec<f64> {
        self.table.durations(PhoneClass::Consonant)
    }
}

/// Extracts phones from `{root}/{lang}/textgrid`, joins them with
/// `alignment_analysis.csv` and writes `stat_data.csv` next to it.
pub fn build_phone_dataset(
    extractor: &DurationExtractor,
    layout: &DatasetLayout,
) -> Result<PhoneDataset, DurationError> {
    let extraction = extractor.extract_phones(&layout.textgrid_dir())?;
    let metrics = MetricsTable::from_csv(&layout.metrics_csv())?;
    let table = merge_phone_metrics(&extraction.rows, &metrics);

    let stat_data = layout.stat_data_csv();
    table.write_csv(&stat_data)?;
    tracing::info!(
        lang = %layout.lang,
        phones = extraction.rows.len(),
        merged = table.len(),
        metrics_rows = metrics.len(),
        path = %stat_data.display(),
        "wrote stat data"
    );

    Ok(PhoneDataset {
        lang: layout.lang.clone(),
        files_processed: extraction.files_processed,
        phones_extracted: extraction.rows.len(),
        failures: extraction.failures,
        table,
    })
}

pub fn load_words(
    extractor: &DurationExtractor,
    layout: &DatasetLayout,
) -> Result<Extraction<WordUnit>, DurationError> {
    extractor.extract_words(&layout.textgrid_dir())
}
