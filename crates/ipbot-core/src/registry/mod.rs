//! Strategy registry
//!
//! The registry maps configuration names to strategy factories, so the set
//! of lookups a deployment runs is chosen by configuration rather than by
//! hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ipbot_core::registry::StrategyRegistry;
//!
//! let mut registry = StrategyRegistry::new();
//! ipbot_fetch_http::register(&mut registry);
//!
//! // Named subset, in the requested order
//! let strategies = registry.resolve_spec("ipify, identme")?;
//!
//! // Every known strategy, in canonical order
//! let strategies = registry.resolve_spec("all")?;
//! ```
//!
//! ## Canonical Order
//!
//! Registration order is canonical order. It is what `"all"` expands to and
//! what error messages list as available.

use crate::config::parse_strategy_list;
use crate::error::{Error, Result};
use crate::traits::{FetchStrategy, FetchStrategyFactory};
use std::sync::Arc;
use tracing::debug;

/// Reserved name that selects every registered strategy
pub const ALL_STRATEGIES: &str = "all";

/// Registry of strategy factories, keyed by configuration name
#[derive(Default)]
pub struct StrategyRegistry {
    /// Registered factories in canonical order
    strategies: Vec<(String, Box<dyn FetchStrategyFactory>)>,
}

impl StrategyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy factory
    ///
    /// Registering an existing name replaces its factory but keeps its
    /// position in canonical order.
    ///
    /// # Parameters
    ///
    /// - `name`: Configuration name (e.g., "ipify", "identme")
    /// - `factory`: Factory object for creating strategy instances
    pub fn register_strategy(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn FetchStrategyFactory>,
    ) {
        let name = name.into();
        match self.strategies.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = factory,
            None => self.strategies.push((name, factory)),
        }
    }

    /// Resolve configuration names into strategy instances
    ///
    /// # Parameters
    ///
    /// - `names`: Requested names in order, or exactly `["all"]`
    ///
    /// # Returns
    ///
    /// - `Ok(strategies)`: One instance per requested name, duplicates kept
    /// - `Err(Error::Config)`: Empty request, or any unknown name. The
    ///   message names every unknown token and lists the available names.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn FetchStrategy>>> {
        if names.is_empty() {
            return Err(Error::config(format!(
                "No strategies requested. Available: {}",
                self.available()
            )));
        }

        if let [only] = names
            && only.as_ref() == ALL_STRATEGIES
        {
            debug!("Resolving all {} strategies", self.strategies.len());
            return Ok(self
                .strategies
                .iter()
                .map(|(_, factory)| factory.create())
                .collect());
        }

        let mut unknown: Vec<&str> = Vec::new();
        for name in names.iter().map(|name| name.as_ref()) {
            if !self.has_strategy(name) && !unknown.contains(&name) {
                unknown.push(name);
            }
        }

        if !unknown.is_empty() {
            return Err(Error::config(format!(
                "Unknown strategies: {}. Available: {}",
                unknown.join(", "),
                self.available()
            )));
        }

        Ok(names
            .iter()
            .filter_map(|name| self.factory(name.as_ref()))
            .map(|factory| factory.create())
            .collect())
    }

    /// Resolve a comma-separated configuration string
    ///
    /// Tokens are trimmed and empty tokens dropped before resolving.
    pub fn resolve_spec(&self, spec: &str) -> Result<Vec<Arc<dyn FetchStrategy>>> {
        self.resolve(parse_strategy_list(spec).as_slice())
    }

    /// List all registered strategy names in canonical order
    pub fn list_strategies(&self) -> Vec<String> {
        self.strategies.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Check if a strategy name is registered
    pub fn has_strategy(&self, name: &str) -> bool {
        self.factory(name).is_some()
    }

    fn factory(&self, name: &str) -> Option<&dyn FetchStrategyFactory> {
        self.strategies
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, factory)| factory.as_ref())
    }

    fn available(&self) -> String {
        self.list_strategies().join(", ")
    }
}
