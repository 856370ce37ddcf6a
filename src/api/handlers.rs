//! HTTP handlers. Each one decodes its input, calls the frame store and
//! encodes the result; domain failures become `{"ErrorMsg": ..}` bodies.

use super::error::ApiError;
use super::AppState;
use crate::frame::{AggregationKind, Row};
use crate::service::{agg_run, column_index, AggRequest, AggResult, DataFrameHeader};
use crate::utils::error::ServiceError;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use std::sync::Arc;

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn create_frame(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let header: DataFrameHeader = decode(&body)?;
    state.store().get_or_create(header);
    Ok(StatusCode::CREATED)
}

pub async fn get_schema(State(state): State<AppState>) -> Result<Json<DataFrameHeader>, ApiError> {
    Ok(Json(state.store().schema()?))
}

pub async fn add_record(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let row: Row = decode(&body)?;
    state.store().add_record(row)?;
    Ok(StatusCode::CREATED)
}

pub async fn add_records(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let rows: Vec<Row> = decode(&body)?;
    state.store().add_records(rows)?;
    Ok(StatusCode::CREATED)
}

pub async fn get_all_rows(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    Ok(Json(state.store().get_all_rows()?))
}

pub async fn get_row(State(state): State<AppState>, Path(row): Path<String>) -> Result<Json<Row>, ApiError> {
    let idx: i64 = row.parse().map_err(|_| ApiError::InvalidRowIndex(row.clone()))?;
    Ok(Json(state.store().get_row(idx)?))
}

pub async fn clean_frame(State(state): State<AppState>) -> StatusCode {
    state.store().clean();
    StatusCode::OK
}

fn aggregate(state: &AppState, body: &Bytes, kind: AggregationKind) -> Result<Json<AggResult>, ApiError> {
    let request: AggRequest = decode(body)?;
    Ok(Json(state.store().run_aggregate(kind, &request)?))
}

pub async fn agg_sum(State(state): State<AppState>, body: Bytes) -> Result<Json<AggResult>, ApiError> {
    aggregate(&state, &body, AggregationKind::Sum)
}

pub async fn agg_count(State(state): State<AppState>, body: Bytes) -> Result<Json<AggResult>, ApiError> {
    aggregate(&state, &body, AggregationKind::Count)
}

pub async fn agg_avg(State(state): State<AppState>, body: Bytes) -> Result<Json<AggResult>, ApiError> {
    aggregate(&state, &body, AggregationKind::Avg)
}

pub async fn agg_max(State(state): State<AppState>, body: Bytes) -> Result<Json<AggResult>, ApiError> {
    aggregate(&state, &body, AggregationKind::Max)
}

pub async fn agg_min(State(state): State<AppState>, body: Bytes) -> Result<Json<AggResult>, ApiError> {
    aggregate(&state, &body, AggregationKind::Min)
}

pub async fn agg_distinct(State(state): State<AppState>, body: Bytes) -> Result<Json<usize>, ApiError> {
    let request: AggRequest = decode(&body)?;
    Ok(Json(state.store().distinct(&request)?))
}

/// SUM and COUNT computed concurrently; returns `[sum rows, count rows]`
pub async fn agg_fanout(State(state): State<AppState>, body: Bytes) -> Result<Json<Vec<AggResult>>, ApiError> {
    let request: AggRequest = decode(&body)?;

    // The lock is released before awaiting; the tasks work on a snapshot.
    let (agg, column) = {
        let store = state.store();
        let agg = store.aggregation(&request.pivots)?;
        let column = column_index(request.agg_column, &agg).map_err(ServiceError::from)?;
        (Arc::new(agg), column)
    };

    Ok(Json(agg_run(agg, column, state.agg_timeout).await))
}

pub async fn total_calls(State(state): State<AppState>) -> Json<u64> {
    Json(state.metrics.total_calls())
}

pub async fn total_get_calls(State(state): State<AppState>) -> Json<u64> {
    Json(state.metrics.total_get_calls())
}

pub async fn total_post_calls(State(state): State<AppState>) -> Json<u64> {
    Json(state.metrics.total_post_calls())
}
