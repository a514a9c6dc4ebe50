use std::path::Path;

use crate::config::ExtractionConfig;
use crate::error::DurationError;
use crate::extraction::extract_units;
use crate::pipeline::builder::DurationExtractorBuilder;
use crate::pipeline::traits::PhoneClassifier;
use crate::types::{Extraction, PhoneClass, PhoneUnit, WordUnit};

/// Filters and classifies the intervals of every TextGrid in a directory.
pub struct DurationExtractor {
    phone_config: ExtractionConfig,
    word_config: ExtractionConfig,
    classifier: Box<dyn PhoneClassifier>,
}

pub(crate) struct DurationExtractorParts {
    pub phone_config: ExtractionConfig,
    pub word_config: ExtractionConfig,
    pub classifier: Box<dyn PhoneClassifier>,
}

impl DurationExtractor {
    pub(crate) fn from_parts(parts: DurationExtractorParts) -> Self {
        Self {
            phone_config: parts.phone_config,
            word_config: parts.word_config,
            classifier: parts.classifier,
        }
    }

    pub fn builder() -> DurationExtractorBuilder {
        DurationExtractorBuilder::new()
    }

    pub fn phone_config(&self) -> &ExtractionConfig {
        &self.phone_config
    }

    pub fn word_config(&self) -> &ExtractionConfig {
        &self.word_config
    }

    pub fn classify(&self, label: &str) -> PhoneClass {
        self.classifier.classify(label)
    }

    /// One row per retained phone interval, tagged vowel or consonant.
    pub fn extract_phones(&self, dir: &Path) -> Result<Extraction<PhoneUnit>, DurationError> {
        extract_units(dir, &self.phone_config, |file_id, phone, duration| {
            let class = self.classifier.classify(&phone);
            PhoneUnit {
                file_id: file_id.to_string(),
                phone,
                duration,
                class,
            }
        })
    }

    pub fn extract_words(&self, dir: &Path) -> Result<Extraction<WordUnit>, DurationError> {
        extract_units(dir, &self.word_config, |file_id, word, duration| WordUnit {
            file_id: file_id.to_string(),
            char_count: word.chars().count(),
            word,
            duration,
        })
    }
}

impl Default for DurationExtractor {
    fn default() -> Self {
        Self::from_parts(DurationExtractorParts {
            phone_config: ExtractionConfig::phones(),
            word_config: ExtractionConfig::words(),
            classifier: Box::new(crate::pipeline::defaults::IpaVowelClassifier),
        })
    }
}
