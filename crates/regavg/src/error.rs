//! Error types for regional averaging.

use sst_common::GridError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while aggregating SST data.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// Grid geometry or region handling failed.
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller violated an argument contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A spatial or temporal resolution is not supported by the operation.
    #[error("unsupported resolution: {0}")]
    UnsupportedResolution(String),

    /// An input product could not be read.
    #[error("failed to read {}: {message}", .path.display())]
    ReadFailed { path: PathBuf, message: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AggregationError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an UnsupportedResolution error.
    pub fn unsupported_resolution(msg: impl Into<String>) -> Self {
        Self::UnsupportedResolution(msg.into())
    }

    /// Create a ReadFailed error.
    pub fn read_failed(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::ReadFailed {
            path: path.into(),
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for AggregationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;
