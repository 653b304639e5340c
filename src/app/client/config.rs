//! HTTP client configuration and building logic

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, limits};
use crate::errors::{AppError, Result};

/// Configuration for the IIIF fetch client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Total retry attempts for a single fetch
    pub retry_total: u32,
    /// Exponential backoff factor applied to the base retry delay
    pub backoff_factor: f64,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of connections per host
    pub pool_max_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry_total: limits::DEFAULT_RETRY_TOTAL,
            backoff_factor: limits::DEFAULT_BACKOFF_FACTOR,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> Result<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .pool_max_idle_per_host(self.pool_max_per_host);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder
            .build()
            .map_err(|e| AppError::generic(format!("Failed to build HTTP client: {e}")))
    }

    /// Backoff delay before retry attempt `attempt` (1-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = limits::RETRY_BASE_DELAY_MS as f64
            * self.backoff_factor
            * 2_u64.pow(attempt.saturating_sub(1)) as f64;
        Duration::from_millis(exponential as u64)
    }
}
