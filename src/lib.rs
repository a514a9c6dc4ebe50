pub mod annotation;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod types;

pub use config::{AnalysisConfig, CorpusPrepConfig, DatasetLayout, DurationBounds, ExtractionConfig};
pub use corpus::CorpusPreparer;
pub use dataset::{build_phone_dataset, PhoneDataset};
pub use error::DurationError;
pub use extraction::classify::is_vowel;
pub use extraction::merge::{merge_phone_metrics, MetricsTable, StatTable};
pub use pipeline::builder::DurationExtractorBuilder;
pub use pipeline::runtime::DurationExtractor;
pub use pipeline::traits::{PhoneClassifier, Transcoder, TranscriptRomanizer};
pub use types::{Extraction, FileFailure, PhoneClass, PhoneUnit, WordUnit};
