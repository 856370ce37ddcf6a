//! Schema-checked row storage.
//!
//! A frame holds two ordered column lists fixed at creation: pivot columns
//! (categorical, `String`) and value columns (`i64`). Rows may carry fewer
//! cells than the schema declares, never more.
//!
//! ```text
//! DataFrame{["A", "B", "C"], ["V1", "V2"]}
//!   A  B  C  V1  V2
//!   a  b  c  10  100
//!   a  d  e  20  200
//!   x  y  z  30  400
//! ```

use super::aggregation::Aggregation;
use crate::utils::error::{FrameError, SchemaBound};
use log::debug;
use serde::{Deserialize, Serialize};

/// One frame row: pivot cells followed by value cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub pivots: Vec<String>,
    pub vals: Vec<i64>,
}

impl Row {
    pub fn new<P: Into<String>>(pivots: impl IntoIterator<Item = P>, vals: impl Into<Vec<i64>>) -> Self {
        Self {
            pivots: pivots.into_iter().map(Into::into).collect(),
            vals: vals.into(),
        }
    }
}

/// Operations every frame implementation exposes.
///
/// Callback-taking methods receive each row as `(pivots, vals)` slices in
/// storage order.
pub trait Frame {
    /// Pivot column names in declared order
    fn pivot_columns(&self) -> &[String];

    /// Value column names in declared order
    fn value_columns(&self) -> &[String];

    /// Append one row, rejecting it if it is wider than the schema
    fn add_record(&mut self, pivots: Vec<String>, vals: Vec<i64>) -> Result<(), FrameError>;

    /// Append a batch of rows. Either every row is committed or none is.
    fn add_records(&mut self, records: Vec<Row>) -> Result<(), FrameError>;

    /// All rows in insertion order
    fn get_all_records(&self) -> &[Row];

    /// Row at `idx` in insertion order
    fn get_record(&self, idx: usize) -> Result<&Row, FrameError>;

    /// Group the rows by the named pivot columns
    fn aggregate<S: AsRef<str>>(&self, pivot_names: &[S]) -> Result<Aggregation, FrameError>;

    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&[String], &[i64]);

    /// New frame whose rows carry the values returned by `transform`.
    /// Rows whose transform fails are dropped.
    fn map<F, E>(&self, transform: F) -> Self
    where
        Self: Sized,
        F: FnMut(&[String], &[i64]) -> Result<Vec<i64>, E>;

    /// New frame with the rows for which `predicate` returns `Ok(true)`.
    fn filter<F, E>(&self, predicate: F) -> Self
    where
        Self: Sized,
        F: FnMut(&[String], &[i64]) -> Result<bool, E>;

    /// Accumulating reduce starting at 0: each successful `combine` result
    /// is added to the running total.
    fn reduce<F, E>(&self, combine: F) -> i64
    where
        F: FnMut(i64, &[String], &[i64]) -> Result<i64, E>;
}

/// In-memory frame backed by a `Vec<Row>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    pivot_names: Vec<String>,
    val_names: Vec<String>,
    rows: Vec<Row>,
}

impl DataFrame {
    /// Create an empty frame. Names are taken as given; duplicates and empty
    /// names are accepted.
    pub fn new<P, V>(pivot_names: impl IntoIterator<Item = P>, val_names: impl IntoIterator<Item = V>) -> Self
    where
        P: Into<String>,
        V: Into<String>,
    {
        Self {
            pivot_names: pivot_names.into_iter().map(Into::into).collect(),
            val_names: val_names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Empty frame sharing this frame's schema
    pub fn empty_like(&self) -> Self {
        Self {
            pivot_names: self.pivot_names.clone(),
            val_names: self.val_names.clone(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column indices of `names` in the pivot schema, in the order given
    pub fn pivot_indices<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, FrameError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.pivot_names
                    .iter()
                    .position(|p| p == name)
                    .ok_or_else(|| FrameError::UnknownPivotColumn(name.to_string()))
            })
            .collect()
    }

    /// Seeded variant of [`Frame::reduce`]
    pub fn reduce_with<F, E>(&self, seed: i64, mut combine: F) -> i64
    where
        F: FnMut(i64, &[String], &[i64]) -> Result<i64, E>,
    {
        let mut total = seed;
        for row in &self.rows {
            if let Ok(value) = combine(total, &row.pivots, &row.vals) {
                total = total.saturating_add(value);
            }
        }
        total
    }

    /// Like [`Frame::map`], but the first failing transform aborts the map
    pub fn try_map<F, E>(&self, mut transform: F) -> Result<Self, E>
    where
        F: FnMut(&[String], &[i64]) -> Result<Vec<i64>, E>,
        E: From<FrameError>,
    {
        let mut out = self.empty_like();
        for row in &self.rows {
            let vals = transform(&row.pivots, &row.vals)?;
            out.add_record(row.pivots.clone(), vals)?;
        }
        Ok(out)
    }

    /// Like [`Frame::filter`], but the first failing predicate aborts the filter
    pub fn try_filter<F, E>(&self, mut predicate: F) -> Result<Self, E>
    where
        F: FnMut(&[String], &[i64]) -> Result<bool, E>,
    {
        let mut out = self.empty_like();
        for row in &self.rows {
            if predicate(&row.pivots, &row.vals)? {
                out.rows.push(row.clone());
            }
        }
        Ok(out)
    }

    fn check_shape(&self, pivots: usize, vals: usize) -> Result<(), FrameError> {
        if pivots > self.pivot_names.len() {
            return Err(FrameError::SchemaViolation {
                bound: SchemaBound::Pivots,
                actual: pivots,
                declared: self.pivot_names.len(),
            });
        }
        if vals > self.val_names.len() {
            return Err(FrameError::SchemaViolation {
                bound: SchemaBound::Vals,
                actual: vals,
                declared: self.val_names.len(),
            });
        }
        Ok(())
    }
}

impl Frame for DataFrame {
    fn pivot_columns(&self) -> &[String] {
        &self.pivot_names
    }

    fn value_columns(&self) -> &[String] {
        &self.val_names
    }

    fn add_record(&mut self, pivots: Vec<String>, vals: Vec<i64>) -> Result<(), FrameError> {
        self.check_shape(pivots.len(), vals.len())?;
        self.rows.push(Row { pivots, vals });
        Ok(())
    }

    fn add_records(&mut self, records: Vec<Row>) -> Result<(), FrameError> {
        for row in &records {
            self.check_shape(row.pivots.len(), row.vals.len())?;
        }
        debug!("Committing batch of {} rows", records.len());
        self.rows.extend(records);
        Ok(())
    }

    fn get_all_records(&self) -> &[Row] {
        &self.rows
    }

    fn get_record(&self, idx: usize) -> Result<&Row, FrameError> {
        self.rows
            .get(idx)
            .ok_or_else(|| FrameError::IndexOutOfRange(i64::try_from(idx).unwrap_or(i64::MAX)))
    }

    fn aggregate<S: AsRef<str>>(&self, pivot_names: &[S]) -> Result<Aggregation, FrameError> {
        Aggregation::new(self, pivot_names)
    }

    fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&[String], &[i64]),
    {
        for row in &self.rows {
            visit(&row.pivots, &row.vals);
        }
    }

    fn map<F, E>(&self, mut transform: F) -> Self
    where
        F: FnMut(&[String], &[i64]) -> Result<Vec<i64>, E>,
    {
        let mut out = self.empty_like();
        self.for_each(|pivots, vals| {
            let Ok(new_vals) = transform(pivots, vals) else {
                return;
            };
            if let Err(err) = out.add_record(pivots.to_vec(), new_vals) {
                debug!("map dropped row {:?}: {}", pivots, err);
            }
        });
        out
    }

    fn filter<F, E>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[String], &[i64]) -> Result<bool, E>,
    {
        let mut out = self.empty_like();
        for row in &self.rows {
            if matches!(predicate(&row.pivots, &row.vals), Ok(true)) {
                out.rows.push(row.clone());
            }
        }
        out
    }

    fn reduce<F, E>(&self, combine: F) -> i64
    where
        F: FnMut(i64, &[String], &[i64]) -> Result<i64, E>,
    {
        self.reduce_with(0, combine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        let mut df = DataFrame::new(["A", "B"], ["V1", "V2"]);
        df.add_records(vec![
            Row::new(["a", "b"], [1, 10]),
            Row::new(["a", "c"], [2, 20]),
            Row::new(["x", "y"], [3, 30]),
        ])
        .unwrap();
        df
    }

    #[test]
    fn test_add_record_rejects_wide_rows() {
        let mut df = DataFrame::new(["A"], ["V1"]);

        let err = df.add_record(vec!["a".into(), "b".into()], vec![1]).unwrap_err();
        assert_eq!(err.to_string(), "pivot length 2 exceed the frame pivot size 1");

        assert!(df.add_record(vec![], vec![]).is_ok());
        assert_eq!(df.len(), 1);
    }

    #[test]
    fn test_add_records_is_atomic() {
        let mut df = sample();
        let result = df.add_records(vec![
            Row::new(["m", "n"], [1, 1]),
            Row::new(["m", "n"], [1, 1, 1]),
        ]);

        assert!(result.is_err());
        assert_eq!(df.len(), 3);
    }

    #[test]
    fn test_get_record_out_of_range() {
        let df = sample();
        assert_eq!(df.get_record(1).unwrap().pivots, vec!["a", "c"]);
        assert_eq!(df.get_record(3), Err(FrameError::IndexOutOfRange(3)));
    }

    #[test]
    fn test_map_drops_failed_rows() {
        let df = sample();
        let mapped = df.map(|pivots, vals| {
            if pivots[0] == "x" {
                Err("skip")
            } else {
                Ok(vals.iter().map(|v| v * 2).collect())
            }
        });

        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.get_record(1).unwrap().vals, vec![4, 40]);
        assert_eq!(mapped.pivot_columns(), df.pivot_columns());
    }

    #[test]
    fn test_filter_excludes_errors() {
        let df = sample();
        let kept = df.filter(|pivots, vals| match pivots[1].as_str() {
            "c" => Err(()),
            _ => Ok(vals[0] >= 1),
        });

        let pivots: Vec<_> = kept.get_all_records().iter().map(|r| r.pivots[1].clone()).collect();
        assert_eq!(pivots, vec!["b", "y"]);
    }

    #[test]
    fn test_reduce_always_adds() {
        let df = sample();
        // returned values 1, 3, 7 are each added to the running total
        let total = df.reduce(|acc, _, vals| Ok::<_, ()>(acc + vals[0]));
        assert_eq!(total, 11);

        let seeded = df.reduce_with(100, |_, _, vals| Ok::<_, ()>(vals[1]));
        assert_eq!(seeded, 160);
    }

    #[test]
    fn test_try_filter_propagates() {
        let df = sample();
        let result = df.try_filter(|pivots, _| if pivots[0] == "x" { Err("bad row") } else { Ok(true) });
        assert_eq!(result.unwrap_err(), "bad row");
    }
}
