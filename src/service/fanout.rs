//! Concurrent SUM + COUNT over one aggregation snapshot.
//!
//! Both aggregates run on blocking tasks and are joined against a shared
//! deadline. A task that misses the deadline contributes an empty result;
//! it is not stopped, its output is simply discarded.

use super::models::{create_agg_result, AggResult};
use crate::frame::{Aggregate, Aggregation};
use crate::utils::error::FrameError;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};

/// Run SUM(`column`) and COUNT concurrently, returning `[sum, count]`.
///
/// `column` must already be validated against the aggregation.
pub async fn agg_run(agg: Arc<Aggregation>, column: usize, timeout: Duration) -> Vec<AggResult> {
    let deadline = Instant::now() + timeout;

    let sum_agg = Arc::clone(&agg);
    let sum_task = tokio::task::spawn_blocking(move || {
        info!("-> sum");
        sum_agg.sum(column).map(|pivots| create_agg_result(&pivots))
    });

    let count_task = tokio::task::spawn_blocking(move || {
        info!("-> count");
        Ok(create_agg_result(&agg.count()))
    });

    let (sum, count) = tokio::join!(
        join_within("sum", deadline, sum_task),
        join_within("count", deadline, count_task),
    );

    info!("Agg done");
    vec![sum, count]
}

/// Wait for `task` until `deadline`, substituting an empty result on
/// timeout or failure
pub async fn join_within(
    label: &str,
    deadline: Instant,
    task: JoinHandle<Result<AggResult, FrameError>>,
) -> AggResult {
    match timeout_at(deadline, task).await {
        Ok(Ok(Ok(rows))) => rows,
        Ok(Ok(Err(err))) => {
            warn!("{} failed: {}", label, err);
            Vec::new()
        }
        Ok(Err(join_err)) => {
            error!("{} task panicked or was cancelled: {}", label, join_err);
            Vec::new()
        }
        Err(_) => {
            warn!("Timeout during {}...", label);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{AggregationKind, DataFrame, Frame, Row};
    use crate::service::models::AggResultRow;

    fn aggregation() -> Arc<Aggregation> {
        let mut df = DataFrame::new(["A", "B"], ["V1"]);
        df.add_records(vec![
            Row::new(["a", "b"], [10]),
            Row::new(["a", "b"], [5]),
            Row::new(["x", "y"], [1]),
        ])
        .unwrap();
        Arc::new(df.aggregate(&["A"]).unwrap())
    }

    #[tokio::test]
    async fn test_agg_run_returns_sum_then_count() {
        let results = agg_run(aggregation(), 0, Duration::from_secs(5)).await;

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0][0],
            AggResultRow {
                kind: AggregationKind::Sum,
                pivots: vec!["a".to_string()],
                value: 15,
            }
        );
        assert_eq!(results[1][0].kind, AggregationKind::Count);
        assert_eq!(results[1][0].value, 2);
    }

    #[tokio::test]
    async fn test_join_within_times_out() {
        let slow = tokio::task::spawn_blocking(|| {
            std::thread::sleep(Duration::from_millis(500));
            Ok(vec![AggResultRow {
                kind: AggregationKind::Sum,
                pivots: vec![],
                value: 1,
            }])
        });

        let deadline = Instant::now() + Duration::from_millis(20);
        assert!(join_within("slow", deadline, slow).await.is_empty());
    }

    #[tokio::test]
    async fn test_join_within_swallows_errors() {
        let failing = tokio::task::spawn_blocking(|| {
            Err(FrameError::ColumnIndexOutOfRange { index: 3, len: 1 })
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        assert!(join_within("failing", deadline, failing).await.is_empty());
    }
}
