//! Core traits for the IP bot
//!
//! - [`FetchStrategy`]: Retrieve the public IP from one external service
//! - [`FetchStrategyFactory`]: Build strategies from registry keys

pub mod fetch_strategy;

pub use fetch_strategy::{DEFAULT_FETCH_TIMEOUT, FetchStrategy, FetchStrategyFactory};
