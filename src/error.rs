use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DurationError {
    #[error("I/O error while {context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error while {context} '{}': {source}", .path.display())]
    Csv {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse TextGrid '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("'{}' has no interval tier named '{tier}'", .path.display())]
    MissingTier { path: PathBuf, tier: String },
    #[error("'{}' has no column named '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("cannot draw {requested} samples without replacement from {available} values")]
    InsufficientSamples { requested: usize, available: usize },
    #[error("transcoding '{}' failed: {message}", .source_path.display())]
    Transcode {
        source_path: PathBuf,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl DurationError {
    pub(crate) fn io(context: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(context: &'static str, path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn missing_tier(path: &Path, tier: &str) -> Self {
        Self::MissingTier {
            path: path.to_path_buf(),
            tier: tier.to_string(),
        }
    }

    pub(crate) fn missing_column(path: &Path, column: &str) -> Self {
        Self::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        }
    }

    pub(crate) fn transcode(source_path: &Path, message: impl Into<String>) -> Self {
        Self::Transcode {
            source_path: source_path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
