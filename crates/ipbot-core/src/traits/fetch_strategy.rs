// # Fetch Strategy Trait
//
// Defines the interface for retrieving the public IP address from one
// external lookup service.
//
// ## Implementations
//
// - HTTP services (ident.me, ifconfig.me, ipify, ipinfo.io, ...):
//   `ipbot-fetch-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ipbot_core::FetchStrategy;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let strategy = /* FetchStrategy implementation */;
//
//     let ip = strategy.fetch().await?;
//     println!("{} says {}", strategy.name(), ip);
//
//     Ok(())
// }
// ```

use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Per-call timeout applied by every built-in strategy
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Trait for IP lookup strategies
///
/// A strategy performs exactly one outbound call per [`fetch`](Self::fetch)
/// and never retries. Implementations must be thread-safe: the orchestrator
/// runs every configured strategy on its own task.
///
/// ## Failure contract
///
/// - Timed-out calls return [`FetchError::Timeout`]
/// - Connectivity and non-2xx status return [`FetchError::Network`]
/// - Empty or malformed bodies return [`FetchError::Parsing`]
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Stable display name, used in reports and logs
    fn name(&self) -> &str;

    /// Fetch the public IP address as reported by this service
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Fixed deadline for a single call
    ///
    /// The orchestrator enforces this independently of the implementation,
    /// so a strategy can never hold up a run past its own timeout.
    fn timeout(&self) -> Duration {
        DEFAULT_FETCH_TIMEOUT
    }
}

/// Helper trait for constructing strategies by registry key
pub trait FetchStrategyFactory: Send + Sync {
    /// Create a fresh strategy instance
    fn create(&self) -> Arc<dyn FetchStrategy>;
}
