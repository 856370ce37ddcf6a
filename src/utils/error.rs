//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::frame::AggregationKind;
use std::fmt;
use thiserror::Error;

/// Which schema bound a rejected row exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaBound {
    Pivots,
    Vals,
}

impl fmt::Display for SchemaBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaBound::Pivots => write!(f, "pivot"),
            SchemaBound::Vals => write!(f, "vals"),
        }
    }
}

/// Errors raised by the frame and aggregation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("{bound} length {actual} exceed the frame {bound} size {declared}")]
    SchemaViolation {
        bound: SchemaBound,
        actual: usize,
        declared: usize,
    },

    #[error("Could not find index {0}")]
    IndexOutOfRange(i64),

    #[error("Not found pivot {0}")]
    UnknownPivotColumn(String),

    #[error("index {index} out of bounds [0:{len})")]
    ColumnIndexOutOfRange { index: i64, len: usize },

    #[error("cannot compute {0} over an empty frame")]
    EmptyAggregation(AggregationKind),
}

/// Errors surfaced by the frame store to the HTTP layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("No instance of dataframe created")]
    NoFrameInstance,

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Errors that can occur while talking to a frame server
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server rejected request (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid server response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur during file input/output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
