//! Load-time error taxonomy.
//!
//! Every variant is fatal and raised before any gameplay state exists. Runtime
//! operations on a valid grid never return these; they clamp instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    /// Weighted spawns are present but there is nothing to draw from.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed or missing fields in the level asset.
    #[error("format error: {0}")]
    Format(String),

    /// A matrix disagrees with the declared board size.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Negative weight or zero total.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("failed to read level asset: {0}")]
    Io(#[from] std::io::Error),
}

impl LevelError {
    pub fn code(&self) -> &'static str {
        match self {
            LevelError::Configuration(_) => "configuration_error",
            LevelError::Format(_) => "format_error",
            LevelError::DimensionMismatch { .. } => "dimension_mismatch",
            LevelError::InvalidWeights(_) => "invalid_weights",
            LevelError::Io(_) => "io_error",
        }
    }

    pub(crate) fn dimension(what: impl Into<String>, expected: usize, found: usize) -> Self {
        LevelError::DimensionMismatch {
            what: what.into(),
            expected,
            found,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Format(err.to_string())
    }
}
