use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotifError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid sequence at position {position}: {message}")]
    InvalidSequence { position: usize, message: String },

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported alphabet: {0:?} (expected 'dna' or 'protein')")]
    UnsupportedAlphabet(String),

    #[error("Invalid motif source: {0}")]
    InvalidMotifSource(String),

    #[error("Invalid pattern for motif {motif:?}: {source}")]
    InvalidPattern {
        motif: String,
        #[source]
        source: regex::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Type alias for Result with MotifError
pub type Result<T> = std::result::Result<T, MotifError>;

impl MotifError {
    /// Create a new InvalidSequence error
    pub fn invalid_sequence(position: usize, message: impl Into<String>) -> Self {
        MotifError::InvalidSequence {
            position,
            message: message.into(),
        }
    }

    /// Create a new InvalidPattern error
    pub fn invalid_pattern(motif: impl Into<String>, source: regex::Error) -> Self {
        MotifError::InvalidPattern {
            motif: motif.into(),
            source,
        }
    }
}

impl From<polars::prelude::PolarsError> for MotifError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        MotifError::DataError(err.to_string())
    }
}
