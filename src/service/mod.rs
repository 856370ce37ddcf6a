//! Boundary layer between HTTP and the frame core.
//!
//! This module provides:
//! - `store`: the single-instance frame holder
//! - `models`: JSON wire types
//! - `fanout`: concurrent SUM + COUNT with a deadline
//! - `metrics`: request counters

pub mod fanout;
pub mod metrics;
pub mod models;
pub mod store;

// Re-export main types and functions
pub use fanout::agg_run;
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use models::{create_agg_result, AggRequest, AggResult, AggResultRow, DataFrameHeader, JsonError};
pub use store::{column_index, FrameStore};
