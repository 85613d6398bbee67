//! Error types for the IP bot
//!
//! Two families live here:
//! - [`Error`]: caller or configuration mistakes, raised synchronously
//! - [`FetchError`]: runtime failures of a single strategy call, which the
//!   orchestrator folds into an [`ErrorCategory`] and never propagates

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for IP bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the IP bot
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure of a single strategy call
///
/// Strategies only construct `Parsing` themselves; the transport layer
/// produces `Timeout` and `Network`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The call did not complete within its fixed timeout
    #[error("Request to {service} timed out after {timeout:?}")]
    Timeout {
        /// Display name of the service
        service: String,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// DNS, connect, or HTTP status failure
    #[error("Failed to fetch IP from {service}: {message}")]
    Network {
        /// Display name of the service
        service: String,
        /// Underlying cause text
        message: String,
    },

    /// The service answered but the body was empty or malformed
    #[error("Invalid response format from {service}: {message}")]
    Parsing {
        /// Display name of the service
        service: String,
        /// What was wrong with the body
        message: String,
    },

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Create a timeout error
    pub fn timeout(service: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            service: service.into(),
            timeout,
        }
    }

    /// Create a network error
    pub fn network(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a response-shape error
    pub fn parsing(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parsing {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Classify this failure
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Timeout { .. } => ErrorCategory::Timeout,
            FetchError::Network { .. } => ErrorCategory::NetworkError,
            FetchError::Parsing { .. } => ErrorCategory::ParsingError,
            FetchError::Other(_) => ErrorCategory::UnknownError,
        }
    }
}

/// User-visible classification of a failed strategy call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Timeout,
    NetworkError,
    ParsingError,
    UnknownError,
}

impl ErrorCategory {
    /// Label shown in rendered reports
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::NetworkError => "Network error",
            ErrorCategory::ParsingError => "Parsing error",
            ErrorCategory::UnknownError => "Error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_follows_variant_not_message() {
        // A parsing error whose text mentions a timeout is still a parsing error
        let err = FetchError::parsing("ipify", "timed out while reading");
        assert_eq!(err.category(), ErrorCategory::ParsingError);

        let err = FetchError::Other("Network error".to_string());
        assert_eq!(err.category(), ErrorCategory::UnknownError);

        let err = FetchError::timeout("ident.me", Duration::from_secs(3));
        assert_eq!(err.category(), ErrorCategory::Timeout);

        let err = FetchError::network("ifconfig.me", "connection refused");
        assert_eq!(err.category(), ErrorCategory::NetworkError);
    }

    #[test]
    fn test_network_error_carries_service_and_cause() {
        let err = FetchError::network("ipinfo.io", "HTTP status 503");
        assert_eq!(
            err.to_string(),
            "Failed to fetch IP from ipinfo.io: HTTP status 503"
        );
    }

    #[test]
    fn test_config_errors_surface_their_cause() {
        let err = Error::config("strategy list is empty");
        assert_eq!(err.to_string(), "Configuration error: strategy list is empty");

        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ErrorCategory::Timeout.to_string(), "Timeout");
        assert_eq!(ErrorCategory::NetworkError.to_string(), "Network error");
        assert_eq!(ErrorCategory::ParsingError.to_string(), "Parsing error");
        assert_eq!(ErrorCategory::UnknownError.to_string(), "Error");
    }
}
