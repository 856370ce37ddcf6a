//! Grouped aggregation over a projection of a frame.
//!
//! An [`Aggregation`] owns a projected frame holding only the requested
//! pivot columns (plus every value column). SUM, COUNT and AVG group rows by
//! the comma-joined pivot tuple and report groups in first-seen order.
//! MAX and MIN are not grouped: they return every row that holds the
//! extreme value across the whole projection, in scan order.
//!
//! ```text
//! Agg[A,B].Sum(0)        Agg[A].Sum(1)
//!   A  B  SUM              A  SUM
//!   a  b  10               a  300
//!   a  d  20               x  400
//!   x  y  30
//! ```

use super::data_frame::{DataFrame, Frame, Row};
use super::navigation_map::NavigationMap;
use crate::utils::config::PIVOT_KEY_DELIMITER;
use crate::utils::error::FrameError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The aggregate function that produced a [`Pivot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationKind {
    Sum,
    Count,
    Avg,
    Max,
    Min,
}

impl AggregationKind {
    /// Lowercase name used on the wire and in URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::Sum => "sum",
            AggregationKind::Count => "count",
            AggregationKind::Avg => "avg",
            AggregationKind::Max => "max",
            AggregationKind::Min => "min",
        }
    }

    /// Whether the function reads a value column
    pub fn needs_column(&self) -> bool {
        !matches!(self, AggregationKind::Count)
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl std::str::FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(AggregationKind::Sum),
            "count" => Ok(AggregationKind::Count),
            "avg" => Ok(AggregationKind::Avg),
            "max" => Ok(AggregationKind::Max),
            "min" => Ok(AggregationKind::Min),
            other => Err(format!("unknown aggregation '{}'", other)),
        }
    }
}

/// One row of an aggregate result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivot {
    /// Number of pivot columns in the aggregation
    pub dim: usize,
    pub kind: AggregationKind,
    /// Pivot tuple identifying the group (or the winning row for MAX/MIN)
    pub pivots: Vec<String>,
    pub value: i64,
}

/// Read-only grouped view over a frame
pub trait Aggregate {
    /// Number of pivot columns chosen
    fn dim(&self) -> usize;

    /// Names of the chosen pivot columns
    fn pivots(&self) -> &[String];

    /// Number of distinct pivot tuples
    fn distinct(&self) -> usize;

    fn count(&self) -> Vec<Pivot>;

    fn sum(&self, column: usize) -> Result<Vec<Pivot>, FrameError>;

    /// Per-group mean, truncated toward zero
    fn avg(&self, column: usize) -> Result<Vec<Pivot>, FrameError>;

    fn max(&self, column: usize) -> Result<Vec<Pivot>, FrameError>;

    fn min(&self, column: usize) -> Result<Vec<Pivot>, FrameError>;
}

/// Projection of a frame onto a subset of its pivot columns
#[derive(Debug, Clone)]
pub struct Aggregation {
    frame: DataFrame,
    dim: usize,
}

#[derive(Debug)]
struct Group {
    pivots: Vec<String>,
    rows: i64,
    total: i64,
}

/// Group key for a pivot tuple
pub fn pivot_key<S: AsRef<str>>(pivots: &[S]) -> String {
    pivots
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PIVOT_KEY_DELIMITER)
}

/// Find the result for `pivotation` in an aggregate result set.
///
/// Matching is by group key, so the last match wins when keys collide.
pub fn get_pivot_or_none<'a, S: AsRef<str>>(pivots: &'a [Pivot], pivotation: &[S]) -> Option<&'a Pivot> {
    let wanted = pivot_key(pivotation);
    pivots.iter().rev().find(|p| pivot_key(&p.pivots) == wanted)
}

fn value_at(row: &Row, column: usize) -> i64 {
    row.vals.get(column).copied().unwrap_or(0)
}

impl Aggregation {
    /// Project `source` onto `pivot_names`, keeping every value column.
    ///
    /// Columns appear in the projection in the order they were requested.
    pub fn new<S: AsRef<str>>(source: &DataFrame, pivot_names: &[S]) -> Result<Self, FrameError> {
        let indices = source.pivot_indices(pivot_names)?;
        let names: Vec<String> = pivot_names.iter().map(|n| n.as_ref().to_string()).collect();

        let mut frame = DataFrame::new(names, source.value_columns().iter().cloned());
        let projected: Vec<Row> = source
            .get_all_records()
            .iter()
            .map(|row| Row {
                pivots: indices
                    .iter()
                    .map(|&i| row.pivots.get(i).cloned().unwrap_or_default())
                    .collect(),
                vals: row.vals.clone(),
            })
            .collect();
        frame.add_records(projected)?;

        debug!("Built aggregation over {:?} with {} rows", frame.pivot_columns(), frame.len());

        Ok(Self {
            frame,
            dim: indices.len(),
        })
    }

    /// The projected frame
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    fn check_column(&self, column: usize) -> Result<(), FrameError> {
        let len = self.frame.value_columns().len();
        if column >= len {
            return Err(FrameError::ColumnIndexOutOfRange {
                index: i64::try_from(column).unwrap_or(i64::MAX),
                len,
            });
        }
        Ok(())
    }

    /// Single pass grouping rows by pivot key, optionally totalling `column`
    fn group(&self, column: Option<usize>) -> NavigationMap<Group> {
        let mut groups = NavigationMap::new();
        for row in self.frame.get_all_records() {
            let group = groups.get_or_insert_with(&pivot_key(&row.pivots), || Group {
                pivots: row.pivots.clone(),
                rows: 0,
                total: 0,
            });
            group.rows += 1;
            if let Some(col) = column {
                group.total = group.total.saturating_add(value_at(row, col));
            }
        }
        groups
    }

    fn grouped_results(
        &self,
        kind: AggregationKind,
        column: Option<usize>,
        value: impl Fn(&Group) -> i64,
    ) -> Vec<Pivot> {
        self.group(column)
            .iter()
            .map(|(_, group)| Pivot {
                dim: self.dim,
                kind,
                pivots: group.pivots.clone(),
                value: value(group),
            })
            .collect()
    }

    /// Every row whose value ties the final extreme, in scan order.
    ///
    /// `rank(candidate, current)` returns `Greater` when the candidate beats
    /// the current extreme. A strictly better value drops earlier winners.
    fn extremes(
        &self,
        kind: AggregationKind,
        column: usize,
        rank: impl Fn(i64, i64) -> Ordering,
    ) -> Result<Vec<Pivot>, FrameError> {
        self.check_column(column)?;
        let rows = self.frame.get_all_records();
        let first = rows.first().ok_or(FrameError::EmptyAggregation(kind))?;

        let mut best = value_at(first, column);
        let mut winners = Vec::new();
        for row in rows {
            let value = value_at(row, column);
            match rank(value, best) {
                Ordering::Less => continue,
                Ordering::Greater => winners.clear(),
                Ordering::Equal => {}
            }
            best = value;
            winners.push(Pivot {
                dim: self.dim,
                kind,
                pivots: row.pivots.clone(),
                value,
            });
        }
        Ok(winners)
    }
}

impl Aggregate for Aggregation {
    fn dim(&self) -> usize {
        self.dim
    }

    fn pivots(&self) -> &[String] {
        self.frame.pivot_columns()
    }

    fn distinct(&self) -> usize {
        self.group(None).len()
    }

    fn count(&self) -> Vec<Pivot> {
        self.grouped_results(AggregationKind::Count, None, |g| g.rows)
    }

    fn sum(&self, column: usize) -> Result<Vec<Pivot>, FrameError> {
        self.check_column(column)?;
        Ok(self.grouped_results(AggregationKind::Sum, Some(column), |g| g.total))
    }

    fn avg(&self, column: usize) -> Result<Vec<Pivot>, FrameError> {
        self.check_column(column)?;
        // rows is at least 1 for every group that exists
        Ok(self.grouped_results(AggregationKind::Avg, Some(column), |g| g.total / g.rows))
    }

    fn max(&self, column: usize) -> Result<Vec<Pivot>, FrameError> {
        self.extremes(AggregationKind::Max, column, |candidate, best| candidate.cmp(&best))
    }

    fn min(&self, column: usize) -> Result<Vec<Pivot>, FrameError> {
        self.extremes(AggregationKind::Min, column, |candidate, best| best.cmp(&candidate))
    }
}
