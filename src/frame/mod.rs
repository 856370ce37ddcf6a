//! The frame core: schema-checked row storage and grouped aggregation.
//!
//! - `data_frame`: rows, the [`Frame`] trait and its in-memory implementation
//! - `navigation_map`: insertion-ordered map backing first-seen grouping
//! - `aggregation`: projection onto pivot columns and SUM/COUNT/AVG/MAX/MIN

pub mod aggregation;
pub mod data_frame;
pub mod navigation_map;

// Re-export main types
pub use aggregation::{get_pivot_or_none, pivot_key, Aggregate, Aggregation, AggregationKind, Pivot};
pub use data_frame::{DataFrame, Frame, Row};
pub use navigation_map::NavigationMap;
