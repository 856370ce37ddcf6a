//! Wire types exchanged with HTTP clients.
//!
//! Field names follow the JSON contract:
//! - schema: `{"pivots": [..], "vals": [..]}`
//! - row: `{"pivots": [..], "vals": [..]}` (see [`crate::frame::Row`])
//! - aggregation request: `{"pivots": [..], "aggColumn": n}`
//! - aggregation result row: `{"type": "sum", "pivots": [..], "value": n}`
//! - error: `{"ErrorMsg": ".."}`

use crate::frame::{AggregationKind, Pivot};
use serde::{Deserialize, Serialize};

/// Column names used to create a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFrameHeader {
    pub pivots: Vec<String>,
    pub vals: Vec<String>,
}

/// Parameters of an aggregate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggRequest {
    pub pivots: Vec<String>,

    /// Value column to aggregate; ignored by COUNT and DISTINCT
    #[serde(rename = "aggColumn", default)]
    pub agg_column: i64,
}

/// One aggregate result on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggResultRow {
    #[serde(rename = "type")]
    pub kind: AggregationKind,
    pub pivots: Vec<String>,
    pub value: i64,
}

pub type AggResult = Vec<AggResultRow>;

impl From<&Pivot> for AggResultRow {
    fn from(pivot: &Pivot) -> Self {
        Self {
            kind: pivot.kind,
            pivots: pivot.pivots.clone(),
            value: pivot.value,
        }
    }
}

/// Convert core results to their wire form
pub fn create_agg_result(pivots: &[Pivot]) -> AggResult {
    pivots.iter().map(AggResultRow::from).collect()
}

/// Error body returned with 4xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonError {
    #[serde(rename = "ErrorMsg")]
    pub error_msg: String,
}

impl JsonError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_msg: message.into(),
        }
    }
}
