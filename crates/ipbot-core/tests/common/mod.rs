//! Test doubles and common utilities for orchestration contract tests
//!
//! These strategies never touch the network. Each one follows a script:
//! wait a fixed delay, then return an IP, fail, panic, or hang.

#![allow(dead_code)]

use ipbot_core::error::FetchError;
use ipbot_core::traits::{FetchStrategy, FetchStrategyFactory};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a scripted strategy does once its delay has passed
#[derive(Debug, Clone)]
pub enum Script {
    Ip(&'static str),
    Fail(FetchError),
    Panic,
    Hang,
}

/// Tracks how many scripted calls are running at once
#[derive(Debug, Default)]
pub struct ConcurrencyProbe {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Highest number of calls observed in flight together
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A strategy that follows a script
pub struct ScriptedStrategy {
    name: String,
    delay: Duration,
    script: Script,
    timeout: Duration,
    /// Call counter for fetch()
    fetch_call_count: Arc<AtomicUsize>,
    probe: Option<Arc<ConcurrencyProbe>>,
}

impl ScriptedStrategy {
    pub fn new(name: impl Into<String>, script: Script) -> Self {
        Self {
            name: name.into(),
            delay: Duration::ZERO,
            script,
            timeout: Duration::from_secs(3),
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
            probe: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_probe(mut self, probe: Arc<ConcurrencyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Share this strategy's call counter with the test
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_call_count)
    }
}

#[async_trait::async_trait]
impl FetchStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(probe) = &self.probe {
            probe.enter();
        }

        tokio::time::sleep(self.delay).await;

        if let Some(probe) = &self.probe {
            probe.exit();
        }

        match &self.script {
            Script::Ip(ip) => Ok(ip.to_string()),
            Script::Fail(err) => Err(err.clone()),
            Script::Panic => panic!("scripted strategy {} panicked", self.name),
            Script::Hang => std::future::pending().await,
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Factory producing scripted strategies, for registry tests
pub struct ScriptedFactory {
    pub name: &'static str,
    pub ip: &'static str,
}

impl ScriptedFactory {
    pub fn boxed(name: &'static str, ip: &'static str) -> Box<dyn FetchStrategyFactory> {
        Box::new(Self { name, ip })
    }
}

impl FetchStrategyFactory for ScriptedFactory {
    fn create(&self) -> Arc<dyn FetchStrategy> {
        Arc::new(ScriptedStrategy::new(self.name, Script::Ip(self.ip)))
    }
}

pub fn ok(name: &str, ip: &'static str) -> Arc<dyn FetchStrategy> {
    Arc::new(ScriptedStrategy::new(name, Script::Ip(ip)))
}

pub fn ok_after(name: &str, ip: &'static str, delay_ms: u64) -> Arc<dyn FetchStrategy> {
    Arc::new(
        ScriptedStrategy::new(name, Script::Ip(ip)).with_delay(Duration::from_millis(delay_ms)),
    )
}

pub fn failing(name: &str, err: FetchError) -> Arc<dyn FetchStrategy> {
    Arc::new(ScriptedStrategy::new(name, Script::Fail(err)))
}

pub fn panicking(name: &str) -> Arc<dyn FetchStrategy> {
    Arc::new(ScriptedStrategy::new(name, Script::Panic))
}

pub fn timed_out(name: &str) -> Arc<dyn FetchStrategy> {
    failing(name, FetchError::timeout(name, Duration::from_secs(3)))
}

pub fn network_error(name: &str) -> Arc<dyn FetchStrategy> {
    failing(name, FetchError::network(name, "connection refused"))
}

pub fn parsing_error(name: &str) -> Arc<dyn FetchStrategy> {
    failing(name, FetchError::parsing(name, "empty response"))
}

/// Names of the results, in reported order
pub fn result_names(result: &ipbot_core::FetchResult) -> Vec<String> {
    result.results().iter().map(|r| r.name.clone()).collect()
}
