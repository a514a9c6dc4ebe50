use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "mfa_output";
pub const DEFAULT_CORPUS_OUT_DIR: &str = "mfa_input";
pub const TEXTGRID_EXTENSION: &str = "TextGrid";
pub const PHONES_TIER: &str = "phones";
pub const WORDS_TIER: &str = "words";
pub const METRICS_FILE_COLUMN: &str = "file";

/// Silence, spoken-noise and unknown-word markers emitted by the aligner.
pub const IGNORED_LABELS: [&str; 5] = ["", "sp", "sil", "spn", "<unk>"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationBounds {
    pub min_secs: f64,
    pub max_secs: f64,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl DurationBounds {
    pub const PHONE: Self = Self {
        min_secs: 0.0001,
        max_secs: 0.6,
        min_inclusive: false,
        max_inclusive: true,
    };

    pub const WORD: Self = Self {
        min_secs: 0.05,
        max_secs: 2.0,
        min_inclusive: false,
        max_inclusive: false,
    };

    pub fn contains(&self, duration_secs: f64) -> bool {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return false;
        }
        let above_min = if self.min_inclusive {
            duration_secs >= self.min_secs
        } else {
            duration_secs > self.min_secs
        };
        let below_max = if self.max_inclusive {
            duration_secs <= self.max_secs
        } else {
            duration_secs < self.max_secs
        };
        above_min && below_max
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub tier_name: String,
    pub bounds: DurationBounds,
    pub ignored_labels: Vec<String>,
    /// Labels must be strictly shorter than this many characters.
    pub max_label_chars: Option<usize>,
    pub alphabetic_only: bool,
    pub lowercase_labels: bool,
}

impl ExtractionConfig {
    pub const WORD_MAX_LABEL_CHARS: usize = 15;

    pub fn phones() -> Self {
        Self {
            tier_name: PHONES_TIER.to_string(),
            bounds: DurationBounds::PHONE,
            ignored_labels: default_ignored_labels(),
            max_label_chars: None,
            alphabetic_only: false,
            lowercase_labels: false,
        }
    }

    pub fn words() -> Self {
        Self {
            tier_name: WORDS_TIER.to_string(),
            bounds: DurationBounds::WORD,
            ignored_labels: default_ignored_labels(),
            max_label_chars: Some(Self::WORD_MAX_LABEL_CHARS),
            alphabetic_only: true,
            lowercase_labels: true,
        }
    }

    pub fn is_ignored(&self, label: &str) -> bool {
        self.ignored_labels.iter().any(|ignored| ignored == label)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::phones()
    }
}

fn default_ignored_labels() -> Vec<String> {
    IGNORED_LABELS.iter().map(|label| label.to_string()).collect()
}

/// Per-language file layout under the alignment output root:
/// `{root}/{lang}/textgrid/`, `{root}/{lang}/alignment_analysis.csv`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    pub root: PathBuf,
    pub lang: String,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>, lang: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            lang: lang.into(),
        }
    }

    pub fn lang_dir(&self) -> PathBuf {
        self.root.join(&self.lang)
    }

    pub fn textgrid_dir(&self) -> PathBuf {
        self.lang_dir().join("textgrid")
    }

    pub fn metrics_csv(&self) -> PathBuf {
        self.lang_dir().join("alignment_analysis.csv")
    }

    pub fn stat_data_csv(&self) -> PathBuf {
        self.lang_dir().join("stat_data.csv")
    }

    pub fn duration_report_json(&self) -> PathBuf {
        self.lang_dir().join("duration_report.json")
    }

    pub fn word_regression_json(&self) -> PathBuf {
        self.lang_dir().join("word_regression.json")
    }

    pub fn comparison_json(root: &Path, first_lang: &str, second_lang: &str) -> PathBuf {
        root.join(format!("{first_lang}_{second_lang}_comparison.json"))
    }
}

#[derive(Debug, Clone)]
pub struct CorpusPrepConfig {
    pub sample_size: usize,
    pub seed: u64,
    pub sample_rate_hz: u32,
    pub channels: u16,
}

impl CorpusPrepConfig {
    pub const DEFAULT_SAMPLE_SIZE: usize = 500;
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 16_000;
}

impl Default for CorpusPrepConfig {
    fn default() -> Self {
        Self {
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
            seed: Self::DEFAULT_SEED,
            sample_rate_hz: Self::DEFAULT_SAMPLE_RATE_HZ,
            channels: 1,
        }
    }
}

/// Sample sizes and plot-data resolution for the duration reports.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub clt_sample_size: usize,
    pub clt_simulations: usize,
    pub comparison_sample_size: usize,
    pub min_group_size: usize,
    pub duration_histogram_bins: usize,
    pub means_histogram_bins: usize,
    pub curve_points: usize,
    /// Upper end of the sampled log-normal density curve, in seconds.
    pub curve_max_secs: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            clt_sample_size: 50,
            clt_simulations: 1000,
            comparison_sample_size: 121,
            min_group_size: 5,
            duration_histogram_bins: 50,
            means_histogram_bins: 30,
            curve_points: 100,
            curve_max_secs: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_bounds_exclude_min_and_include_max() {
        let bounds = DurationBounds::PHONE;
        assert!(!bounds.contains(0.0001));
        assert!(bounds.contains(0.00011));
        assert!(bounds.contains(0.6));
        assert!(!bounds.contains(0.6000001));
    }

    #[test]
    fn word_bounds_are_open_on_both_ends() {
        let bounds = DurationBounds::WORD;
        assert!(!bounds.contains(0.05));
        assert!(bounds.contains(0.051));
        assert!(bounds.contains(1.999));
        assert!(!bounds.contains(2.0));
    }

    #[test]
    fn bounds_reject_non_positive_and_non_finite() {
        let permissive = DurationBounds {
            min_secs: -1.0,
            max_secs: f64::INFINITY,
            min_inclusive: true,
            max_inclusive: true,
        };
        assert!(!permissive.contains(0.0));
        assert!(!permissive.contains(-0.5));
        assert!(!permissive.contains(f64::NAN));
        assert!(!permissive.contains(f64::INFINITY));
    }

    #[test]
    fn extraction_config_defaults_to_phones() {
        let config = ExtractionConfig::default();
        assert_eq!(config.tier_name, "phones");
        assert_eq!(config.bounds, DurationBounds::PHONE);
        assert!(config.is_ignored("sil"));
        assert!(config.is_ignored("<unk>"));
        assert!(config.is_ignored(""));
        assert!(!config.is_ignored("a"));
        assert!(!config.alphabetic_only);
    }

    #[test]
    fn word_config_limits_label_length() {
        let config = ExtractionConfig::words();
        assert_eq!(config.tier_name, "words");
        assert_eq!(config.max_label_chars, Some(15));
        assert!(config.alphabetic_only);
        assert!(config.lowercase_labels);
    }

    #[test]
    fn dataset_layout_paths() {
        let layout = DatasetLayout::new("mfa_output", "fr");
        assert_eq!(layout.textgrid_dir(), PathBuf::from("mfa_output/fr/textgrid"));
        assert_eq!(
            layout.metrics_csv(),
            PathBuf::from("mfa_output/fr/alignment_analysis.csv")
        );
        assert_eq!(
            layout.stat_data_csv(),
            PathBuf::from("mfa_output/fr/stat_data.csv")
        );
        assert_eq!(
            DatasetLayout::comparison_json(Path::new("mfa_output"), "fr", "es"),
            PathBuf::from("mfa_output/fr_es_comparison.json")
        );
    }

    #[test]
    fn corpus_prep_config_default() {
        let config = CorpusPrepConfig::default();
        assert_eq!(config.sample_size, 500);
        assert_eq!(config.seed, 42);
        assert_eq!(config.sample_rate_hz, 16_000);
        assert_eq!(config.channels, 1);
    }

    #[test]
    fn analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.clt_sample_size, 50);
        assert_eq!(config.clt_simulations, 1000);
        assert_eq!(config.comparison_sample_size, 121);
        assert_eq!(config.min_group_size, 5);
    }
}
