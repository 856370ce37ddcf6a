//! HTTP client for talking to a pivot frame server.

use crate::frame::{AggregationKind, Row};
use crate::service::{AggRequest, AggResult, DataFrameHeader, JsonError};
use crate::utils::config::DEFAULT_CLIENT_TIMEOUT;
use crate::utils::error::ClientError;
use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Client for the frame server's JSON API
pub struct FrameClient {
    client: Client,
    base_url: String,
}

impl FrameClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(DEFAULT_CLIENT_TIMEOUT)
            .build()
            .map_err(ClientError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create the frame (no-op on the server if one already exists)
    pub fn create_frame(&self, header: &DataFrameHeader) -> Result<(), ClientError> {
        info!("Creating frame at {}", self.base_url);
        self.send(self.client.post(self.url("/frame")).json(header))?;
        Ok(())
    }

    pub fn schema(&self) -> Result<DataFrameHeader, ClientError> {
        self.fetch(self.client.get(self.url("/frame")))
    }

    pub fn add_record(&self, row: &Row) -> Result<(), ClientError> {
        self.send(self.client.post(self.url("/frame/row")).json(row))?;
        Ok(())
    }

    /// Send `rows` as one all-or-nothing batch
    pub fn add_records(&self, rows: &[Row]) -> Result<(), ClientError> {
        debug!("Posting batch of {} rows", rows.len());
        self.send(self.client.post(self.url("/frame/rows")).json(rows))?;
        Ok(())
    }

    pub fn get_all_records(&self) -> Result<Vec<Row>, ClientError> {
        self.fetch(self.client.get(self.url("/frame/row/all")))
    }

    pub fn get_record(&self, idx: i64) -> Result<Row, ClientError> {
        self.fetch(self.client.get(self.url(&format!("/frame/row/{}", idx))))
    }

    pub fn clean(&self) -> Result<(), ClientError> {
        self.send(self.client.put(self.url("/frame/clean")))?;
        Ok(())
    }

    /// Run one aggregate function on the server
    pub fn aggregate(&self, kind: AggregationKind, request: &AggRequest) -> Result<AggResult, ClientError> {
        let path = format!("/frame/agg/{}", kind.as_str());
        self.fetch(self.client.get(self.url(&path)).json(request))
    }

    pub fn distinct(&self, request: &AggRequest) -> Result<usize, ClientError> {
        self.fetch(self.client.get(self.url("/frame/agg/distinct")).json(request))
    }

    /// SUM and COUNT in one call, as `[sum, count]`
    pub fn aggregate_all(&self, request: &AggRequest) -> Result<Vec<AggResult>, ClientError> {
        self.fetch(self.client.get(self.url("/frame/agg")).json(request))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, turning non-success statuses into errors
    fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().map_err(ClientError::RequestFailed)?;
        let status = response.status();
        debug!("{} <- HTTP {}", response.url(), status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<JsonError>(&body)
            .map(|e| e.error_msg)
            .unwrap_or(body);
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let body = self.send(request)?.text().map_err(ClientError::RequestFailed)?;
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Ensure the base URL has a scheme and no trailing slash
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
