//! Error types for the gridpath crate

use thiserror::Error;

use crate::types::Position;

/// Main error type for the gridpath crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action index {index} (expected 0-3)")]
    InvalidAction { index: usize },

    #[error("invalid grid dimensions {width}x{height} (each side must be at least 1 and the grid at most 4194304 cells)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{role} {position} is outside the {width}x{height} grid")]
    PositionOutOfBounds {
        role: &'static str,
        position: Position,
        width: usize,
        height: usize,
    },

    #[error("grid layout has {got} rows, expected {expected}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("grid row {row} has {got} cells, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid character '{character}' at row {row}, column {column} (expected '.' or '#')")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("wall density {value} must be in range [0.0, 0.6)")]
    InvalidWallDensity { value: f64 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}
