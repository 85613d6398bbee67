//! Configuration types for the IP bot
//!
//! The configuration is loaded once at startup and passed by reference into
//! the registry and the command dispatcher.

use crate::registry::ALL_STRATEGIES;
use serde::{Deserialize, Serialize};

/// Reply sent to the owner on `/start` unless overridden
pub const DEFAULT_GREETING: &str =
    "👋 Hello! You are authorized to use this bot.\nUse /ip to get the current public IP address.";

/// Main bot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// The only caller allowed to use the bot
    pub owner_id: i64,

    /// Comma-separated strategy names, or "all"
    #[serde(default = "default_strategy_order")]
    pub strategy_order: String,

    /// Reply template for `/start`
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl BotConfig {
    /// Create a configuration with defaults for everything but the owner
    pub fn new(owner_id: i64) -> Self {
        Self {
            owner_id,
            strategy_order: default_strategy_order(),
            greeting: default_greeting(),
        }
    }

    /// Set the strategy selection
    pub fn with_strategy_order(mut self, order: impl Into<String>) -> Self {
        self.strategy_order = order.into();
        self
    }

    /// Set the `/start` reply
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Load a configuration from a JSON document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Strategy names in configured order
    pub fn strategy_list(&self) -> Vec<String> {
        parse_strategy_list(&self.strategy_order)
    }

    /// Validate the configuration
    ///
    /// Strategy names are checked against the registry when resolved, not
    /// here.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.strategy_list().is_empty() {
            return Err(crate::Error::config("No strategies configured"));
        }

        if self.greeting.trim().is_empty() {
            return Err(crate::Error::config("Greeting cannot be empty"));
        }

        Ok(())
    }
}

/// Split a delimited strategy selection into trimmed, non-empty names
pub fn parse_strategy_list(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_strategy_order() -> String {
    ALL_STRATEGIES.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}
