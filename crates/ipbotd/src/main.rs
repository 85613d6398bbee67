// # ipbotd - IP Bot Daemon
//
// This is a THIN integration layer. All lookup, consensus, and formatting
// logic lives in ipbot-core and the strategy crates.
//
// The ipbotd daemon is responsible for:
// 1. Reading configuration from environment variables (or a JSON file)
// 2. Initializing logging and the runtime
// 3. Registering strategies and resolving the configured selection
// 4. Serving chat commands over a line-oriented local transport
//
// ## Configuration
//
// - `IPBOT_CONFIG_FILE`: Path to a JSON config file (replaces the variables below)
// - `IPBOT_OWNER_ID`: Numeric id of the only authorized caller (required)
// - `IPBOT_STRATEGIES`: Comma-separated strategy names, or `all` (default)
// - `IPBOT_GREETING`: Reply to `/start` from the owner
// - `IPBOT_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Transport
//
// Each stdin line is `<caller_id> <command>`. The reply is written to
// stdout followed by a blank line. Logs go to stderr.
//
// ## Example
//
// ```bash
// export IPBOT_OWNER_ID=123456
// export IPBOT_STRATEGIES=ipify,identme,ifconfig
//
// echo "123456 /ip" | ipbotd
// ```

use anyhow::{Context, Result};
use ipbot_core::{BotConfig, CommandDispatcher, FetchOrchestrator, StrategyRegistry};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum BotExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<BotExitCode> for ExitCode {
    fn from(code: BotExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

const USAGE: &str = "usage: <caller_id> <command>";

/// Application configuration
#[derive(Debug)]
struct Config {
    bot: BotConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("IPBOT_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        if let Some(path) = lookup("IPBOT_CONFIG_FILE") {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read IPBOT_CONFIG_FILE {}", path))?;
            let bot = BotConfig::from_json(&json)
                .with_context(|| format!("Invalid config file {}", path))?;
            return Ok(Self { bot, log_level });
        }

        let owner_id = lookup("IPBOT_OWNER_ID").context(
            "IPBOT_OWNER_ID is required. Set it via: export IPBOT_OWNER_ID=<numeric user id>",
        )?;
        let owner_id: i64 = owner_id
            .trim()
            .parse()
            .with_context(|| format!("IPBOT_OWNER_ID must be an integer. Got: {}", owner_id))?;

        let mut bot = BotConfig::new(owner_id);
        if let Some(order) = lookup("IPBOT_STRATEGIES") {
            bot = bot.with_strategy_order(order);
        }
        if let Some(greeting) = lookup("IPBOT_GREETING") {
            bot = bot.with_greeting(greeting);
        }

        Ok(Self { bot, log_level })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.bot.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "IPBOT_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    fn tracing_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return BotExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return BotExitCode::ConfigError.into();
    }

    // Stdout carries replies, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BotExitCode::ConfigError.into();
    }

    info!("Starting ipbotd");

    let dispatcher = match build_dispatcher(config.bot) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Startup failed: {}", e);
            return BotExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BotExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = serve(dispatcher).await {
            error!("Daemon error: {}", e);
            BotExitCode::RuntimeError
        } else {
            BotExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Register strategies and wire config → registry → orchestrator → dispatcher
fn build_dispatcher(bot: BotConfig) -> Result<CommandDispatcher> {
    let registry = build_registry();
    info!("Known strategies: {}", registry.list_strategies().join(", "));

    let strategies = registry.resolve(bot.strategy_list().as_slice())?;
    let names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
    info!("Fetching with {} strategies: {}", names.len(), names.join(", "));

    let orchestrator = Arc::new(FetchOrchestrator::new(strategies));
    Ok(CommandDispatcher::new(Arc::new(bot), orchestrator))
}

fn build_registry() -> StrategyRegistry {
    #[allow(unused_mut)]
    let mut registry = StrategyRegistry::new();

    #[cfg(feature = "http")]
    {
        info!("Registering HTTP strategies");
        ipbot_fetch_http::register(&mut registry);
    }

    registry
}

/// Serve commands from stdin until EOF or a shutdown signal
async fn serve(dispatcher: CommandDispatcher) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!("Ready for commands on stdin");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    info!("stdin closed, shutting down");
                    break;
                };

                let reply = match parse_request(&line) {
                    Some((caller_id, text)) => dispatcher.handle(caller_id, text).await,
                    None if line.trim().is_empty() => continue,
                    None => {
                        warn!("Malformed request line: {:?}", line);
                        USAGE.to_string()
                    }
                };

                stdout.write_all(reply.as_bytes()).await?;
                stdout.write_all(b"\n\n").await?;
                stdout.flush().await?;
            }

            signal = &mut shutdown => {
                info!("Received shutdown signal: {}", signal?);
                break;
            }
        }
    }

    info!("Shutting down daemon");
    Ok(())
}

/// Split a transport line into caller id and message text
fn parse_request(line: &str) -> Option<(i64, &str)> {
    let (caller, text) = line.trim().split_once(char::is_whitespace)?;
    let caller_id = caller.parse().ok()?;
    Some((caller_id, text.trim()))
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn shutdown_signal() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for CTRL-C
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
