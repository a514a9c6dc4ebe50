use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::config::METRICS_FILE_COLUMN;
use crate::error::DurationError;
use crate::types::{PhoneClass, PhoneUnit};

const PHONE_COLUMNS: [&str; 4] = ["file_id", "phone", "duration", "type"];

/// Per-file alignment metrics keyed by their `file` column.
#[derive(Debug, Clone)]
pub struct MetricsTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
    rows_by_file: HashMap<String, Vec<usize>>,
}

impl MetricsTable {
    pub fn from_csv(path: &Path) -> Result<Self, DurationError> {
        let file =
            fs::File::open(path).map_err(|e| DurationError::io("opening metrics CSV", path, e))?;
        Self::from_reader(file, path)
    }

    /// `source` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self, DurationError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DurationError::csv("reading metrics header", source, e))?
            .iter()
            .map(str::to_string)
            .collect();
        let key_index = headers
            .iter()
            .position(|header| header == METRICS_FILE_COLUMN)
            .ok_or_else(|| DurationError::missing_column(source, METRICS_FILE_COLUMN))?;

        let mut records = Vec::new();
        let mut rows_by_file: HashMap<String, Vec<usize>> = HashMap::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| DurationError::csv("reading metrics row", source, e))?;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            rows_by_file
                .entry(fields[key_index].clone())
                .or_default()
                .push(records.len());
            records.push(fields);
        }

        Ok(Self {
            headers,
            records,
            rows_by_file,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows_for<'a>(&'a self, file: &str) -> impl Iterator<Item = &'a [String]> + 'a {
        self.rows_by_file
            .get(file)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&index| self.records[index].as_slice())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub unit: PhoneUnit,
    pub metrics: Vec<String>,
}

/// Phone rows joined with their file's metrics, written as `stat_data.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub headers: Vec<String>,
    pub rows: Vec<StatRow>,
}

impl StatTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn durations(&self, class: PhoneClass) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| row.unit.class == class)
            .map(|row| row.unit.duration)
            .collect()
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), DurationError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DurationError::io("creating stat data directory", parent, e))?;
        }
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| DurationError::csv("creating stat data CSV", path, e))?;
        writer
            .write_record(&self.headers)
            .map_err(|e| DurationError::csv("writing stat data header", path, e))?;
        for row in &self.rows {
            let duration = row.unit.duration.to_string();
            let leading = [
                row.unit.file_id.as_str(),
                row.unit.phone.as_str(),
                duration.as_str(),
                row.unit.class.as_str(),
            ];
            writer
                .write_record(leading.into_iter().chain(row.metrics.iter().map(String::as_str)))
                .map_err(|e| DurationError::csv("writing stat data row", path, e))?;
        }
        writer
            .flush()
            .map_err(|e| DurationError::io("flushing stat data CSV", path, e))
    }
}

/// Inner join of phone rows with metrics rows on `file_id == file`.
///
/// Left order is preserved and a phone row is repeated once per matching
/// metrics row. Metrics columns whose names clash with the phone columns get
/// a `_y` suffix, the phone columns an `_x` suffix.
pub fn merge_phone_metrics(units: &[PhoneUnit], metrics: &MetricsTable) -> StatTable {
    let clashes = |name: &str| metrics.headers().iter().any(|header| header == name);
    let mut headers: Vec<String> = PHONE_COLUMNS
        .iter()
        .map(|&name| {
            if clashes(name) {
                format!("{name}_x")
            } else {
                name.to_string()
            }
        })
        .collect();
    headers.extend(metrics.headers().iter().map(|header| {
        if PHONE_COLUMNS.contains(&header.as_str()) {
            format!("{header}_y")
        } else {
            header.clone()
        }
    }));

    let mut rows = Vec::with_capacity(units.len());
    for unit in units {
        for metrics_row in metrics.rows_for(&unit.file_id) {
            rows.push(StatRow {
                unit: unit.clone(),
                metrics: metrics_row.to_vec(),
            });
        }
    }

    tracing::debug!(
        phone_rows = units.len(),
        merged_rows = rows.len(),
        "merged phone rows with alignment metrics"
    );
    StatTable { headers, rows }
}
