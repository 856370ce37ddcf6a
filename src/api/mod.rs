//! HTTP interface for the frame store.
//!
//! One [`FrameStore`] is shared by all requests behind a mutex; the frame
//! itself has no locking of its own.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::build_router;

use crate::service::{FrameStore, RequestMetrics};
use crate::utils::config::ServerConfig;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use log::{error, info};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<Mutex<FrameStore>>,
    pub metrics: Arc<RequestMetrics>,
    /// Deadline for the SUM + COUNT fan-out endpoint
    pub agg_timeout: Duration,
}

impl AppState {
    pub fn new(agg_timeout: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(FrameStore::new())),
            metrics: Arc::new(RequestMetrics::new()),
            agg_timeout,
        }
    }

    /// Lock the store, recovering from a poisoned lock
    pub fn store(&self) -> MutexGuard<'_, FrameStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Middleware counting every routed request
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state
        .metrics
        .record(request.method().as_str(), request.uri().path());
    next.run(request).await
}

/// Bind to `config` and serve until Ctrl-C
pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let state = AppState::new(config.agg_timeout);

    info!("Pivot frame server listening on {}", listener.local_addr()?);
    info!("Request metrics since {}", state.metrics.started_at());

    serve_listener(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_listener<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down pivot frame server...");
}
