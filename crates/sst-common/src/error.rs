//! Error types for grid geometry and region handling.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Primary error type for grid and region operations.
#[derive(Debug, Error)]
pub enum GridError {
    // === Geometry Errors ===
    #[error("index ({x}, {y}) is outside grid of size {width}x{height}")]
    IndexOutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("operation not supported: {0}")]
    Unsupported(String),

    // === Input Errors ===
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl GridError {
    /// Create an IndexOutOfBounds error.
    pub fn out_of_bounds(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self::IndexOutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a Parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Io(err.to_string())
    }
}
