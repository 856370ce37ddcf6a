//! Request counters shared by every HTTP worker.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Requests to paths containing this are not counted
pub const METRICS_PATH_MARKER: &str = "/metrics/";

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Every counted request, whatever the method
    pub total_calls: u64,
    pub total_get_calls: u64,
    pub total_post_calls: u64,
}

/// Mutex-guarded request counters
#[derive(Debug)]
pub struct RequestMetrics {
    counts: Mutex<MetricsSnapshot>,
    started_at: DateTime<Utc>,
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(MetricsSnapshot::default()),
            started_at: Utc::now(),
        }
    }

    /// Count one request. Metrics endpoints themselves are skipped.
    pub fn record(&self, method: &str, path: &str) {
        if path.contains(METRICS_PATH_MARKER) {
            return;
        }

        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        match method {
            "GET" => counts.total_get_calls += 1,
            "POST" => counts.total_post_calls += 1,
            _ => {}
        }
        counts.total_calls += 1;
        debug!("Counted {} {} (total {})", method, path, counts.total_calls);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        *self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn total_calls(&self) -> u64 {
        self.snapshot().total_calls
    }

    pub fn total_get_calls(&self) -> u64 {
        self.snapshot().total_get_calls
    }

    pub fn total_post_calls(&self) -> u64 {
        self.snapshot().total_post_calls
    }

    /// When counting started (RFC 3339)
    pub fn started_at(&self) -> String {
        self.started_at.to_rfc3339()
    }
}
