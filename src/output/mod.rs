//! File input/output for record batches and aggregate results.

pub mod json;

// Re-export main functions
pub use json::{read_batch, write_results, RecordBatch};
