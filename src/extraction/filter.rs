use crate::config::ExtractionConfig;

/// Trims the raw interval text and lower-cases it when the config asks for it.
pub fn normalize_label(config: &ExtractionConfig, raw: &str) -> String {
    let trimmed = raw.trim();
    if config.lowercase_labels {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

pub fn accepts_label(config: &ExtractionConfig, label: &str) -> bool {
    if config.is_ignored(label) {
        return false;
    }
    if config.alphabetic_only && !label.chars().all(char::is_alphabetic) {
        return false;
    }
    match config.max_label_chars {
        Some(max_chars) => label.chars().count() < max_chars,
        None => true,
    }
}

/// A unit is kept only when both its (normalized) label and its duration pass.
pub fn accepts_unit(config: &ExtractionConfig, label: &str, duration_secs: f64) -> bool {
    accepts_label(config, label) && config.bounds.contains(duration_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_markers_are_rejected() {
        let config = ExtractionConfig::phones();
        for label in ["", "sp", "sil", "spn", "<unk>"] {
            assert!(!accepts_unit(&config, label, 0.1), "{label} accepted");
        }
        assert!(accepts_unit(&config, "a", 0.1));
    }

    #[test]
    fn whitespace_only_label_normalizes_to_ignored_empty() {
        let config = ExtractionConfig::phones();
        let label = normalize_label(&config, "   ");
        assert!(!accepts_label(&config, &label));
    }

    #[test]
    fn phone_duration_window() {
        let config = ExtractionConfig::phones();
        assert!(!accepts_unit(&config, "a", 0.0001));
        assert!(accepts_unit(&config, "a", 0.6));
        assert!(!accepts_unit(&config, "a", 0.61));
    }

    #[test]
    fn word_labels_must_be_alphabetic() {
        let config = ExtractionConfig::words();
        assert!(accepts_label(&config, "maison"));
        assert!(accepts_label(&config, "été"));
        assert!(!accepts_label(&config, "aujourd'hui"));
        assert!(!accepts_label(&config, "c3po"));
        assert!(!accepts_label(&config, "deux-mots"));
    }

    #[test]
    fn word_labels_must_be_shorter_than_fifteen_chars() {
        let config = ExtractionConfig::words();
        assert!(accepts_label(&config, "abcdefghijklmn"));
        assert!(!accepts_label(&config, "abcdefghijklmno"));
        // Counted in characters, not bytes.
        assert!(accepts_label(&config, "éééééééééééééé"));
    }

    #[test]
    fn word_labels_are_lowercased() {
        let config = ExtractionConfig::words();
        assert_eq!(normalize_label(&config, " Bonjour "), "bonjour");
        assert_eq!(normalize_label(&config, "<UNK>"), "<unk>");
        let phones = ExtractionConfig::phones();
        assert_eq!(normalize_label(&phones, "A"), "A");
    }
}
