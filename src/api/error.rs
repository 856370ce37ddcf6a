//! Mapping of failures to HTTP responses.

use crate::service::JsonError;
use crate::utils::error::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;
use thiserror::Error;

/// Everything a handler can fail with
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid request body: {0}")]
    UnprocessableBody(#[from] serde_json::Error),

    #[error("Invalid row index {0}")]
    InvalidRowIndex(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnprocessableBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Service(_) | ApiError::InvalidRowIndex(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!("Request failed ({}): {}", status, self);
        (status, Json(JsonError::new(self.to_string()))).into_response()
    }
}
