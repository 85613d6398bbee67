// # HTTP Lookup Strategies
//
// This crate provides the HTTP-based public IP lookup strategies for the
// IP bot, plus the shared transport they all go through.
//
// ## Architecture
//
// - `transport`: one GET with a fixed timeout; every transport failure is
//   translated into a `FetchError` before a strategy sees it
// - `strategy`: table of known services and the single `HttpStrategy` type
//   that serves all of them, differing only in URL and body format
//
// ## Registration
//
// ```rust,ignore
// let mut registry = ipbot_core::StrategyRegistry::new();
// ipbot_fetch_http::register(&mut registry);
// let strategies = registry.resolve_spec("all")?;
// ```

pub mod strategy;
pub mod transport;

pub use strategy::{
    Endpoint, HttpStrategy, HttpStrategyFactory, KNOWN_SERVICES, KnownService, ResponseFormat,
};
pub use transport::HttpFetcher;

use ipbot_core::StrategyRegistry;
use tracing::debug;

/// Register every known HTTP strategy with a registry, in canonical order
pub fn register(registry: &mut StrategyRegistry) {
    for service in &KNOWN_SERVICES {
        debug!("Registering strategy {} ({})", service.key, service.url);
        registry.register_strategy(
            service.key,
            Box::new(HttpStrategyFactory::new(Endpoint::from(service))),
        );
    }
}
