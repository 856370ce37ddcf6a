//! Configuration and constants for the server and CLI.

use std::time::Duration;

/// Default address the HTTP server binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Base URL used by the client commands when none is given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Deadline for each half of the fan-out aggregation
pub const DEFAULT_AGG_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for client HTTP requests
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest request body the server will read (1 MiB)
pub const MAX_BODY_BYTES: usize = 1_048_576;

// Pivot values are joined with this to build group keys.
// Values containing it can collide into the same group.
pub const PIVOT_KEY_DELIMITER: &str = ",";

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Deadline for the fan-out aggregation endpoint
    pub agg_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            agg_timeout: DEFAULT_AGG_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
