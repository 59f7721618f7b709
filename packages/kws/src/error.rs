//! Error type shared by every stage of the training pipelines.
//!
//! The trainers themselves never recover from an error: whatever goes wrong is
//! propagated to `main` and ends the run. The variants exist so callers (and
//! tests) can tell the failure modes apart.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, KwsError>;

#[derive(Debug, Error)]
pub enum KwsError {
    /// A file or directory the run depends on does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The WAV container could not be decoded.
    #[error("wav {}: {source}", path.display())]
    Wav {
        path: PathBuf,
        source: hound::Error,
    },

    #[error("unsupported sample format: {bits}-bit {kind}")]
    UnsupportedFormat { kind: &'static str, bits: u16 },

    #[error("resample: {0}")]
    Resample(String),

    /// A tensor or feature vector does not have the size the pipeline expects.
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("data set is empty")]
    EmptyDataset,

    #[error("command vocabulary is empty")]
    EmptyVocabulary,

    #[error("label {label} outside of vocabulary (0..{classes})")]
    LabelOutOfRange { label: u32, classes: usize },

    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("candle: {0}")]
    Candle(#[from] candle_core::Error),
}

impl KwsError {
    /// Map an `io::Error` to [`KwsError::NotFound`] when that is what it is.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

impl From<rubato::ResampleError> for KwsError {
    fn from(err: rubato::ResampleError) -> Self {
        Self::Resample(err.to_string())
    }
}

impl From<rubato::ResamplerConstructionError> for KwsError {
    fn from(err: rubato::ResamplerConstructionError) -> Self {
        Self::Resample(err.to_string())
    }
}
