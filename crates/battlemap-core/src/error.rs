//! Typed errors for the dataset pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a record's split date fields into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("unrecognised month name {0:?}")]
    UnknownMonth(String),
    #[error("year {0:?} is neither a 4-digit nor a 2-digit year")]
    InvalidYear(String),
    #[error("day {0:?} is not a non-negative integer")]
    InvalidDay(String),
    #[error("{composed:?} is not a valid date and time")]
    InvalidTimestamp { composed: String },
}

/// Failure to load the dataset file. Fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not a JSON array of event records: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}
