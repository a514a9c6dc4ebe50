use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneClass {
    Vowel,
    Consonant,
}

impl PhoneClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vowel => "vowel",
            Self::Consonant => "consonant",
        }
    }
}

/// One retained interval of a "phones" tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneUnit {
    pub file_id: String,
    pub phone: String,
    /// Seconds, always `end - start`.
    pub duration: f64,
    #[serde(rename = "type")]
    pub class: PhoneClass,
}

/// One retained interval of a "words" tier. `word` is lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordUnit {
    pub file_id: String,
    pub word: String,
    pub char_count: usize,
    pub duration: f64,
}

/// An annotation file that could not be read and contributed no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub rows: Vec<T>,
    pub files_processed: usize,
    pub failures: Vec<FileFailure>,
}

impl<T> Extraction<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
