// # ipbot-core
//
// Core library for the public IP consensus bot.
//
// ## Architecture Overview
//
// This library asks several independent lookup services for the host's
// public IP at once and reconciles their answers:
// - **FetchStrategy**: Trait for retrieving the IP from one external service
// - **StrategyRegistry**: Maps configuration names to strategy factories
// - **FetchOrchestrator**: Runs all strategies concurrently, isolating failures
// - **FetchResult**: Per-strategy outcomes plus consensus and conflict state
// - **ResultFormatter**: Renders a FetchResult as a human-readable report
// - **CommandDispatcher**: Authorizes chat commands and produces replies
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from HTTP details
// 2. **Failure Isolation**: One strategy's failure never affects another
// 3. **Plugin-Based**: Strategies are registered by name, no hard-coded if-else
// 4. **Library-First**: The daemon is a thin layer over this crate
// 5. **Typed Failures**: Every failure is classified by kind, never by text

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod registry;
pub mod result;
pub mod traits;

// Re-export core types for convenience
pub use commands::{CommandDispatcher, UNAUTHORIZED_REPLY};
pub use config::BotConfig;
pub use engine::FetchOrchestrator;
pub use error::{Error, ErrorCategory, FetchError, Result};
pub use format::ResultFormatter;
pub use registry::StrategyRegistry;
pub use result::{FetchOutcome, FetchResult, FetcherResult};
pub use traits::{FetchStrategy, FetchStrategyFactory};
