use crate::config::ExtractionConfig;
use crate::error::DurationError;
use crate::pipeline::defaults::IpaVowelClassifier;
use crate::pipeline::runtime::{DurationExtractor, DurationExtractorParts};
use crate::pipeline::traits::PhoneClassifier;

pub struct DurationExtractorBuilder {
    phone_config: ExtractionConfig,
    word_config: ExtractionConfig,
    classifier: Option<Box<dyn PhoneClassifier>>,
}

impl DurationExtractorBuilder {
    pub fn new() -> Self {
        Self {
            phone_config: ExtractionConfig::phones(),
            word_config: ExtractionConfig::words(),
            classifier: None,
        }
    }

    pub fn with_phone_config(mut self, phone_config: ExtractionConfig) -> Self {
        self.phone_config = phone_config;
        self
    }

    pub fn with_word_config(mut self, word_config: ExtractionConfig) -> Self {
        self.word_config = word_config;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn PhoneClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> Result<DurationExtractor, DurationError> {
        validate_config("phone", &self.phone_config)?;
        validate_config("word", &self.word_config)?;

        Ok(DurationExtractor::from_parts(DurationExtractorParts {
            phone_config: self.phone_config,
            word_config: self.word_config,
            classifier: self
                .classifier
                .unwrap_or_else(|| Box::new(IpaVowelClassifier)),
        }))
    }
}

impl Default for DurationExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_config(level: &str, config: &ExtractionConfig) -> Result<(), DurationError> {
    if config.tier_name.trim().is_empty() {
        return Err(DurationError::invalid_input(format!(
            "{level} extraction needs a tier name"
        )));
    }
    let bounds = config.bounds;
    if !bounds.min_secs.is_finite() || bounds.max_secs.is_nan() || bounds.min_secs >= bounds.max_secs
    {
        return Err(DurationError::invalid_input(format!(
            "{level} duration bounds are empty: min {} max {}",
            bounds.min_secs, bounds.max_secs
        )));
    }
    if config.max_label_chars == Some(0) {
        return Err(DurationError::invalid_input(format!(
            "{level} label length limit must be at least 1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DurationBounds;
    use crate::types::PhoneClass;

    struct AlwaysVowel;

    impl PhoneClassifier for AlwaysVowel {
        fn classify(&self, _label: &str) -> PhoneClass {
            PhoneClass::Vowel
        }
    }

    #[test]
    fn builder_defaults_to_phones_and_words() {
        let extractor = DurationExtractorBuilder::new().build().expect("build");
        assert_eq!(extractor.phone_config().tier_name, "phones");
        assert_eq!(extractor.word_config().tier_name, "words");
        assert_eq!(extractor.classify("k"), PhoneClass::Consonant);
    }

    #[test]
    fn classifier_can_be_overridden() {
        let extractor = DurationExtractorBuilder::new()
            .with_classifier(Box::new(AlwaysVowel))
            .build()
            .expect("build");
        assert_eq!(extractor.classify("k"), PhoneClass::Vowel);
    }

    #[test]
    fn custom_tier_name_is_kept() {
        let mut config = ExtractionConfig::phones();
        config.tier_name = "segments".to_string();
        let extractor = DurationExtractorBuilder::new()
            .with_phone_config(config)
            .build()
            .expect("build");
        assert_eq!(extractor.phone_config().tier_name, "segments");
    }

    #[test]
    fn empty_tier_name_is_rejected() {
        let mut config = ExtractionConfig::words();
        config.tier_name = " ".to_string();
        let result = DurationExtractorBuilder::new()
            .with_word_config(config)
            .build();
        assert!(matches!(result, Err(DurationError::InvalidInput { .. })));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut config = ExtractionConfig::phones();
        config.bounds = DurationBounds {
            min_secs: 0.5,
            max_secs: 0.1,
            min_inclusive: true,
            max_inclusive: true,
        };
        let result = DurationExtractorBuilder::new()
            .with_phone_config(config)
            .build();
        assert!(result.is_err());
    }
}
