//! Single-instance frame holder used by the HTTP layer.
//!
//! At most one frame exists per store. Creating a frame while one exists
//! returns the existing one unchanged, and every other operation fails with
//! [`ServiceError::NoFrameInstance`] until a frame is created.

use super::models::{create_agg_result, AggRequest, AggResult, DataFrameHeader};
use crate::frame::{Aggregate, Aggregation, AggregationKind, DataFrame, Frame, Row};
use crate::utils::error::{FrameError, ServiceError};
use log::{debug, info};

/// Owner of the current frame instance, if any
#[derive(Debug, Default)]
pub struct FrameStore {
    frame: Option<DataFrame>,
}

/// Convert a wire column index into a checked value column index
pub fn column_index(column: i64, agg: &Aggregation) -> Result<usize, FrameError> {
    let len = agg.frame().value_columns().len();
    usize::try_from(column)
        .ok()
        .filter(|&c| c < len)
        .ok_or(FrameError::ColumnIndexOutOfRange { index: column, len })
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current frame, creating it from `header` if none exists
    pub fn get_or_create(&mut self, header: DataFrameHeader) -> &DataFrame {
        if self.frame.is_none() {
            info!("Creating frame with pivots {:?} and vals {:?}", header.pivots, header.vals);
        } else {
            debug!("Frame already exists; create request ignored");
        }
        self.frame
            .get_or_insert_with(|| DataFrame::new(header.pivots, header.vals))
    }

    pub fn frame(&self) -> Result<&DataFrame, ServiceError> {
        self.frame.as_ref().ok_or(ServiceError::NoFrameInstance)
    }

    fn frame_mut(&mut self) -> Result<&mut DataFrame, ServiceError> {
        self.frame.as_mut().ok_or(ServiceError::NoFrameInstance)
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Drop the current frame
    pub fn clean(&mut self) {
        if self.frame.take().is_some() {
            info!("Frame discarded");
        }
    }

    pub fn schema(&self) -> Result<DataFrameHeader, ServiceError> {
        let frame = self.frame()?;
        Ok(DataFrameHeader {
            pivots: frame.pivot_columns().to_vec(),
            vals: frame.value_columns().to_vec(),
        })
    }

    pub fn add_record(&mut self, row: Row) -> Result<(), ServiceError> {
        self.frame_mut()?.add_record(row.pivots, row.vals)?;
        Ok(())
    }

    pub fn add_records(&mut self, rows: Vec<Row>) -> Result<(), ServiceError> {
        self.frame_mut()?.add_records(rows)?;
        Ok(())
    }

    pub fn get_all_rows(&self) -> Result<Vec<Row>, ServiceError> {
        Ok(self.frame()?.get_all_records().to_vec())
    }

    pub fn get_row(&self, idx: i64) -> Result<Row, ServiceError> {
        let frame = self.frame()?;
        let idx = usize::try_from(idx).map_err(|_| FrameError::IndexOutOfRange(idx))?;
        Ok(frame.get_record(idx)?.clone())
    }

    /// Build an aggregation over the current frame
    pub fn aggregation(&self, pivots: &[String]) -> Result<Aggregation, ServiceError> {
        Ok(self.frame()?.aggregate(pivots)?)
    }

    /// Run one aggregate function described by `request`
    pub fn run_aggregate(&self, kind: AggregationKind, request: &AggRequest) -> Result<AggResult, ServiceError> {
        let agg = self.aggregation(&request.pivots)?;
        let pivots = match kind {
            AggregationKind::Count => agg.count(),
            AggregationKind::Sum => agg.sum(column_index(request.agg_column, &agg)?)?,
            AggregationKind::Avg => agg.avg(column_index(request.agg_column, &agg)?)?,
            AggregationKind::Max => agg.max(column_index(request.agg_column, &agg)?)?,
            AggregationKind::Min => agg.min(column_index(request.agg_column, &agg)?)?,
        };
        debug!("{} over {:?} produced {} rows", kind, request.pivots, pivots.len());
        Ok(create_agg_result(&pivots))
    }

    pub fn distinct(&self, request: &AggRequest) -> Result<usize, ServiceError> {
        Ok(self.aggregation(&request.pivots)?.distinct())
    }
}
