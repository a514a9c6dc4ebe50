use crate::types::PhoneClass;

/// Whole-label vowel symbols: plain IPA vowels, long vowels, French nasal
/// vowels, common diphthongs and accented Spanish vowels.
#[rustfmt::skip]
pub const VOWEL_SYMBOLS: [&str; 40] = [
    "a", "e", "i", "o", "u", "y", "ø", "œ", "ɒ", "ɔ", "ɛ", "ɪ", "ʊ", "ʌ", "æ", "ɑ", "ə", "ɜ",
    "iː", "uː", "ɔː", "ɑː", "ɜː",
    "ɛ\u{303}", "ɑ\u{303}", "ɔ\u{303}", "œ\u{303}",
    "aɪ", "aʊ", "eɪ", "oʊ", "ɔɪ", "eə", "ɪə", "ʊə",
    "á", "é", "í", "ó", "ú",
];

/// Any label containing one of these characters counts as a vowel.
pub const VOWEL_CHARS: &str = "aeiouyøœɒɔɛɪʊʌæɑəɜáéíóú";

/// Combining tilde, marks nasal vowels.
pub const NASALIZATION_MARK: char = '\u{303}';

const PRIMARY_STRESS: char = 'ˈ';
const SECONDARY_STRESS: char = 'ˌ';

/// Drops stress marks and whitespace from an aligner phone label.
pub fn clean_phone_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != PRIMARY_STRESS && *c != SECONDARY_STRESS && !c.is_whitespace())
        .collect()
}

pub fn is_vowel(label: &str) -> bool {
    let cleaned = clean_phone_label(label);
    if VOWEL_SYMBOLS.contains(&cleaned.as_str()) {
        return true;
    }
    if cleaned.contains(NASALIZATION_MARK) {
        return true;
    }
    cleaned.chars().any(|c| VOWEL_CHARS.contains(c))
}

pub fn classify_phone(label: &str) -> PhoneClass {
    if is_vowel(label) {
        PhoneClass::Vowel
    } else {
        PhoneClass::Consonant
    }
}
