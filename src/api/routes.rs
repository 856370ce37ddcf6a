//! Route table.

use super::handlers::*;
use super::{track_requests, AppState};
use crate::utils::config::MAX_BODY_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

/// Build the router with request counting and a body size limit
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/frame", post(create_frame).get(get_schema))
        .route("/frame/row", post(add_record))
        .route("/frame/rows", post(add_records))
        .route("/frame/row/all", get(get_all_rows))
        .route("/frame/row/{row}", get(get_row))
        .route("/frame/clean", put(clean_frame))
        .route("/frame/agg", get(agg_fanout))
        .route("/frame/agg/sum", get(agg_sum))
        .route("/frame/agg/count", get(agg_count))
        .route("/frame/agg/avg", get(agg_avg))
        .route("/frame/agg/max", get(agg_max))
        .route("/frame/agg/min", get(agg_min))
        .route("/frame/agg/distinct", get(agg_distinct))
        .route("/metrics/total", get(total_calls))
        .route("/metrics/total/get", get(total_get_calls))
        .route("/metrics/total/post", get(total_post_calls))
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
