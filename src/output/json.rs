//! JSON batch reader and result writer.
//!
//! A batch file holds rows to load and, optionally, the schema to create
//! the frame with:
//!
//! ```json
//! {
//!   "schema": {"pivots": ["A", "B"], "vals": ["V1"]},
//!   "rows": [{"pivots": ["a", "b"], "vals": [10]}]
//! }
//! ```

use crate::frame::Row;
use crate::service::DataFrameHeader;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Rows to load, with an optional schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<DataFrameHeader>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Read a record batch from a JSON file
///
/// # Errors
/// * `OutputError::Io` - file cannot be opened
/// * `OutputError::Json` - contents are not a valid batch
pub fn read_batch(input_path: impl AsRef<Path>) -> Result<RecordBatch, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading batch from: {}", input_path.display());

    let file = File::open(input_path)?;
    let batch: RecordBatch = serde_json::from_reader(BufReader::new(file))?;

    debug!("Batch loaded: {} rows, schema {}",
           batch.rows.len(),
           if batch.schema.is_some() { "present" } else { "absent" });

    Ok(batch)
}

/// Write any serializable result to a pretty-printed JSON file
///
/// Parent directories are created as needed.
pub fn write_results<T: Serialize + ?Sized>(results: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing results to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                )))?;
        }
    }

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, results)?;

    Ok(())
}

/// Reject empty paths and directories
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
