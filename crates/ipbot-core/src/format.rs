//! Report rendering
//!
//! Turns a [`FetchResult`] into the text delivered to the caller. The
//! conflict flag changes how successes are drawn: with a consensus the
//! header already carries the IP, so success lines are bare; under conflict
//! every success line shows its own IP.

use crate::result::{FetchOutcome, FetchResult};

/// Shown in the header when there is no consensus IP
pub const UNKNOWN_IP: &str = "unknown";

const HEADER_MARKER: &str = "🌐";
const AGREE_MARKER: &str = "🟢";
const CONFLICT_MARKER: &str = "🟡";
const FAILURE_MARKER: &str = "❌";

/// Renders fetch results for display
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render a header line, a blank line, then one line per strategy
    pub fn render(&self, result: &FetchResult) -> String {
        let mut lines = Vec::with_capacity(result.results().len() + 2);

        lines.push(format!(
            "{HEADER_MARKER} IP address: {}",
            result.consensus_ip().unwrap_or(UNKNOWN_IP)
        ));
        lines.push(String::new());

        for fetcher in result.results() {
            let line = match &fetcher.outcome {
                FetchOutcome::Success { ip } if result.has_conflicts() => {
                    format!("{CONFLICT_MARKER} {}: {}", fetcher.name, ip)
                }
                FetchOutcome::Success { .. } => format!("{AGREE_MARKER} {}", fetcher.name),
                FetchOutcome::Failure { category } => {
                    format!("{FAILURE_MARKER} {}: {}", fetcher.name, category)
                }
            };
            lines.push(line);
        }

        lines.join("\n")
    }
}
