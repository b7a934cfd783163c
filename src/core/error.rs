// Error handling for trajectory ingestion and playback

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrajectoryError>;

#[derive(Error, Debug)]
pub enum TrajectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported compression type: {0}")]
    UnsupportedCompression(u8),

    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("Invalid UTF-8 in recording")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Schema violation at row {row}: expected {expected} channels, found {found}")]
    SchemaViolation {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No samples loaded")]
    EmptySequence,

    #[error("Invalid sample step: {0}")]
    InvalidStep(f64),
}

/// A field that could not be read as a number. Never fatal: the reading
/// becomes unknown and parsing carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFieldError {
    pub row: usize,
    pub column: usize,
    pub raw: String,
}

impl std::fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} column {}: {:?} is not a number", self.row, self.column, self.raw)
    }
}
