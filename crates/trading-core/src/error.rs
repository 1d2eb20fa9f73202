//! Error types for the backtesting engine.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level backtest error.
#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Signal source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable rows in {source_name} ({skipped} malformed rows skipped)")]
    NoDataAvailable { source_name: String, skipped: usize },

    #[error("CSV error: {0}")]
    Csv(String),
}

/// Result type alias for backtest operations.
pub type BacktestResult<T> = Result<T, BacktestError>;
