//! Shared HTTP request execution
//!
//! Every strategy goes through [`HttpFetcher`], so connectivity failures
//! reach the strategies already classified: timeouts as
//! [`FetchError::Timeout`], everything else (DNS, connect, non-2xx) as
//! [`FetchError::Network`] carrying the service name and the cause.

use ipbot_core::error::FetchError;
use std::time::Duration;
use tracing::debug;

/// Issues GET requests with a fixed timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            // A proxy would answer with its own public address
            client: reqwest::Client::builder()
                .no_proxy()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            timeout,
        }
    }

    /// GET `url` and return the body, requiring a 2xx status
    ///
    /// # Parameters
    ///
    /// - `url`: Endpoint to query
    /// - `service`: Display name used in error messages
    pub async fn fetch_text(&self, url: &str, service: &str) -> Result<String, FetchError> {
        debug!("GET {} ({})", url, service);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.translate(service, e))?;

        response.text().await.map_err(|e| self.translate(service, e))
    }

    fn translate(&self, service: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::timeout(service, self.timeout)
        } else {
            FetchError::network(service, err.to_string())
        }
    }
}
