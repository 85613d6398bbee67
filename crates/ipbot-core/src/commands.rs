//! Command dispatch for the chat transport
//!
//! The transport hands over the caller's id and the raw message text and
//! delivers whatever string comes back. Authorization happens here, before
//! any lookup runs.

use crate::config::BotConfig;
use crate::engine::FetchOrchestrator;
use crate::format::ResultFormatter;
use std::sync::Arc;
use tracing::{info, warn};

/// Reply for every request from anyone but the owner
pub const UNAUTHORIZED_REPLY: &str = "Unauthorized";

/// Reply for commands the bot does not know
pub const HELP_REPLY: &str = "Available commands:\n/start - check access\n/ip - show the current public IP address";

/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Ip,
    Unknown,
}

impl Command {
    /// Parse the first token of a message, ignoring any `@botname` suffix
    pub fn parse(text: &str) -> Self {
        let token = text.split_whitespace().next().unwrap_or_default();
        let command = token.split('@').next().unwrap_or_default();

        match command {
            "/start" => Command::Start,
            "/ip" => Command::Ip,
            _ => Command::Unknown,
        }
    }
}

/// Routes authorized requests to the orchestrator and formatter
#[derive(Clone)]
pub struct CommandDispatcher {
    config: Arc<BotConfig>,
    orchestrator: Arc<FetchOrchestrator>,
    formatter: ResultFormatter,
}

impl CommandDispatcher {
    pub fn new(config: Arc<BotConfig>, orchestrator: Arc<FetchOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
            formatter: ResultFormatter::new(),
        }
    }

    /// Whether `caller_id` may use the bot
    pub fn is_authorized(&self, caller_id: i64) -> bool {
        caller_id == self.config.owner_id
    }

    /// Produce the reply for one message
    pub async fn handle(&self, caller_id: i64, text: &str) -> String {
        let command = Command::parse(text);

        if !self.is_authorized(caller_id) {
            warn!("Unauthorized {:?} attempt from caller {}", command, caller_id);
            return UNAUTHORIZED_REPLY.to_string();
        }

        match command {
            Command::Start => {
                info!("start command from {}", caller_id);
                self.config.greeting.clone()
            }
            Command::Ip => self.report().await,
            Command::Unknown => HELP_REPLY.to_string(),
        }
    }

    /// Run every configured strategy and render the report
    pub async fn report(&self) -> String {
        let result = self.orchestrator.fetch_all().await;
        info!(
            "Sending IP report (consensus: {:?}, conflicts: {})",
            result.consensus_ip(),
            result.has_conflicts()
        );
        self.formatter.render(&result)
    }
}
