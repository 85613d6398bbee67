//! Parallel fetch orchestrator
//!
//! The FetchOrchestrator is responsible for:
//! - Running every configured strategy concurrently
//! - Isolating each strategy's failure (errors, timeouts, panics)
//! - Reporting outcomes in configured order
//! - Deriving consensus across the successful outcomes
//!
//! ## Architecture
//!
//! ```text
//!                      ┌───────────────────┐
//!                      │ FetchOrchestrator │
//!                      └───────────────────┘
//!                                │ spawn one task per strategy
//!         ┌──────────────────────┼──────────────────────┐
//!         ▼                      ▼                      ▼
//! ┌───────────────┐      ┌───────────────┐      ┌───────────────┐
//! │ FetchStrategy │      │ FetchStrategy │      │ FetchStrategy │
//! │ (timeout)     │      │ (timeout)     │      │ (timeout)     │
//! └───────────────┘      └───────────────┘      └───────────────┘
//!         │                      │                      │
//!         └──────────────────────┼──────────────────────┘
//!                                ▼ join all, in order
//!                        ┌──────────────┐
//!                        │ FetchResult  │
//!                        └──────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Spawn one task per strategy, each bounded by the strategy's timeout
//! 2. Await every task handle in configured order
//! 3. Map each outcome to a [`FetcherResult`]
//! 4. Build the [`FetchResult`], which derives consensus and conflicts

use crate::error::{ErrorCategory, FetchError};
use crate::result::{FetchResult, FetcherResult};
use crate::traits::FetchStrategy;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

/// Runs a fixed set of strategies in parallel
///
/// The orchestrator holds nothing but its immutable strategy list, so one
/// instance can serve overlapping [`fetch_all`](Self::fetch_all) calls.
///
/// ## Guarantees
///
/// - Every strategy runs on every call; there is no first-success-wins
/// - A failing, slow, or panicking strategy never affects its siblings
/// - A call finishes no later than the slowest strategy's timeout
/// - No retries at any level
#[derive(Clone)]
pub struct FetchOrchestrator {
    /// Strategies in configured order
    strategies: Vec<Arc<dyn FetchStrategy>>,
}

impl FetchOrchestrator {
    /// Create an orchestrator over strategies in configured order
    pub fn new(strategies: Vec<Arc<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    /// The configured strategies
    pub fn strategies(&self) -> &[Arc<dyn FetchStrategy>] {
        &self.strategies
    }

    /// Run every configured strategy and aggregate the outcomes
    pub async fn fetch_all(&self) -> FetchResult {
        fetch_all(&self.strategies).await
    }
}

/// Run the given strategies concurrently and aggregate the outcomes
///
/// Results follow the order of `strategies`, not completion order.
pub async fn fetch_all(strategies: &[Arc<dyn FetchStrategy>]) -> FetchResult {
    debug!("Fetching public IP from {} strategies", strategies.len());

    let handles: Vec<JoinHandle<Result<String, FetchError>>> = strategies
        .iter()
        .map(|strategy| tokio::spawn(run_with_deadline(Arc::clone(strategy))))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (strategy, handle) in strategies.iter().zip(handles) {
        results.push(to_fetcher_result(strategy.name(), handle.await));
    }

    let result = FetchResult::from_results(results);

    info!(
        "Fetch complete: {}/{} succeeded (consensus: {:?}, conflicts: {})",
        result.success_count(),
        strategies.len(),
        result.consensus_ip(),
        result.has_conflicts()
    );

    result
}

/// Run one strategy, bounded by its own timeout
async fn run_with_deadline(strategy: Arc<dyn FetchStrategy>) -> Result<String, FetchError> {
    let limit = strategy.timeout();
    match tokio::time::timeout(limit, strategy.fetch()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(FetchError::timeout(strategy.name(), limit)),
    }
}

/// Map a joined task into the per-strategy record
fn to_fetcher_result(
    name: &str,
    joined: Result<Result<String, FetchError>, JoinError>,
) -> FetcherResult {
    match joined {
        Ok(Ok(ip)) => {
            debug!("Strategy {} returned {}", name, ip);
            FetcherResult::success(name, ip)
        }
        Ok(Err(e)) => {
            warn!("Strategy {} failed: {}", name, e);
            FetcherResult::failure(name, e.category())
        }
        Err(e) => {
            warn!("Strategy {} task aborted: {}", name, e);
            FetcherResult::failure(name, ErrorCategory::UnknownError)
        }
    }
}
