use crate::service::DataFrameHeader;
use crate::utils::config::DEFAULT_SERVER_URL;
use clap::ValueEnum;
use std::path::PathBuf;

/// Arguments for the load command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct LoadArgs {
    /// Base URL of the frame server
    pub server_url: String,

    /// JSON batch file to load
    pub input: PathBuf,

    /// Schema to create the frame with; overrides the batch file's schema
    pub schema: Option<DataFrameHeader>,

    /// Discard the server's current frame before loading
    pub clean_first: bool,
}

impl Default for LoadArgs {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            input: PathBuf::from("rows.json"),
            schema: None,
            clean_first: false,
        }
    }
}

/// Which aggregate the query command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryKind {
    Sum,
    Count,
    Avg,
    Max,
    Min,
    Distinct,
    /// SUM and COUNT together through the fan-out endpoint
    All,
}

/// Arguments for the query command
#[derive(Debug, Clone)]
pub struct QueryArgs {
    pub server_url: String,
    pub kind: QueryKind,
    pub pivots: Vec<String>,
    pub column: i64,

    /// Write results here instead of stdout
    pub output: Option<PathBuf>,
}
