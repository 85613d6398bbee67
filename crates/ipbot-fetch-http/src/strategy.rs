//! Table-driven HTTP lookup strategies
//!
//! Each external service is an [`Endpoint`]: a display name, a URL, a rule
//! for pulling the IP out of the body, and a timeout. One [`HttpStrategy`]
//! type serves them all.

use crate::transport::HttpFetcher;
use ipbot_core::error::FetchError;
use ipbot_core::traits::{DEFAULT_FETCH_TIMEOUT, FetchStrategy, FetchStrategyFactory};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// How to extract the IP from a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The body is the IP, possibly surrounded by whitespace
    PlainText,
    /// The body is a JSON object carrying the IP in the named field
    JsonField(&'static str),
}

impl ResponseFormat {
    /// Extract the IP from `body`
    ///
    /// Any shape problem is a [`FetchError::Parsing`] naming `service`.
    pub fn extract(&self, service: &str, body: &str) -> Result<String, FetchError> {
        let ip = match self {
            ResponseFormat::PlainText => body.trim().to_string(),
            ResponseFormat::JsonField(field) => {
                let value: Value = serde_json::from_str(body)
                    .map_err(|e| FetchError::parsing(service, format!("not valid JSON: {}", e)))?;

                let object = value.as_object().ok_or_else(|| {
                    FetchError::parsing(service, format!("expected a JSON object, got {}", value))
                })?;

                let field_value = object.get(*field).ok_or_else(|| {
                    FetchError::parsing(
                        service,
                        format!("missing '{}' field in {}", field, value),
                    )
                })?;

                field_value
                    .as_str()
                    .ok_or_else(|| {
                        FetchError::parsing(
                            service,
                            format!("'{}' field is not a string: {}", field, field_value),
                        )
                    })?
                    .trim()
                    .to_string()
            }
        };

        if ip.is_empty() {
            return Err(FetchError::parsing(service, "empty response"));
        }

        Ok(ip)
    }
}

/// Static description of a known lookup service
#[derive(Debug, Clone, Copy)]
pub struct KnownService {
    /// Registry key used in configuration
    pub key: &'static str,
    /// Name shown in reports
    pub display_name: &'static str,
    pub url: &'static str,
    pub format: ResponseFormat,
}

/// Built-in services, in canonical order
pub const KNOWN_SERVICES: [KnownService; 5] = [
    KnownService {
        key: "identme",
        display_name: "ident.me",
        url: "https://4.ident.me/",
        format: ResponseFormat::PlainText,
    },
    KnownService {
        key: "ifconfig",
        display_name: "ifconfig.me",
        url: "https://ifconfig.me/ip",
        format: ResponseFormat::PlainText,
    },
    KnownService {
        key: "ipify",
        display_name: "ipify",
        url: "https://api.ipify.org?format=json",
        format: ResponseFormat::JsonField("ip"),
    },
    KnownService {
        key: "ipinfo",
        display_name: "ipinfo.io",
        url: "https://ipinfo.io/ip",
        format: ResponseFormat::PlainText,
    },
    KnownService {
        key: "custom",
        display_name: "myip.elisei.nl",
        url: "https://myip.elisei.nl",
        format: ResponseFormat::PlainText,
    },
];

/// A concrete lookup target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub display_name: String,
    pub url: String,
    pub format: ResponseFormat,
    pub timeout: Duration,
}

impl Endpoint {
    /// Create an endpoint with the default timeout
    pub fn new(
        display_name: impl Into<String>,
        url: impl Into<String>,
        format: ResponseFormat,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            url: url.into(),
            format,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Override the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&KnownService> for Endpoint {
    fn from(service: &KnownService) -> Self {
        Endpoint::new(service.display_name, service.url, service.format)
    }
}

/// Fetches the public IP from one HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpStrategy {
    endpoint: Endpoint,
    fetcher: HttpFetcher,
}

impl HttpStrategy {
    pub fn new(endpoint: Endpoint) -> Self {
        let fetcher = HttpFetcher::new(endpoint.timeout);
        Self { endpoint, fetcher }
    }
}

#[async_trait::async_trait]
impl FetchStrategy for HttpStrategy {
    fn name(&self) -> &str {
        &self.endpoint.display_name
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let body = self
            .fetcher
            .fetch_text(&self.endpoint.url, self.name())
            .await?;

        self.endpoint.format.extract(self.name(), &body)
    }

    fn timeout(&self) -> Duration {
        self.endpoint.timeout
    }
}

/// Factory for creating HTTP strategies for one endpoint
pub struct HttpStrategyFactory {
    endpoint: Endpoint,
}

impl HttpStrategyFactory {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

impl FetchStrategyFactory for HttpStrategyFactory {
    fn create(&self) -> Arc<dyn FetchStrategy> {
        Arc::new(HttpStrategy::new(self.endpoint.clone()))
    }
}
