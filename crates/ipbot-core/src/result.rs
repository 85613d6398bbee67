//! Result model for one orchestration run
//!
//! [`FetchResult`] is built only through [`FetchResult::from_results`], which
//! derives the consensus IP and the conflict flag from the per-strategy
//! outcomes. The two can never disagree.

use crate::error::ErrorCategory;
use std::collections::HashSet;

/// Outcome of one strategy call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The service returned an IP
    Success { ip: String },
    /// The call failed
    Failure { category: ErrorCategory },
}

/// Per-strategy record for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherResult {
    /// Display name of the strategy
    pub name: String,
    /// What happened
    pub outcome: FetchOutcome,
}

impl FetcherResult {
    /// Create a successful record
    pub fn success(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: FetchOutcome::Success { ip: ip.into() },
        }
    }

    /// Create a failed record
    pub fn failure(name: impl Into<String>, category: ErrorCategory) -> Self {
        Self {
            name: name.into(),
            outcome: FetchOutcome::Failure { category },
        }
    }

    /// Whether this call returned an IP
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Success { .. })
    }

    /// The fetched IP, if this call succeeded
    pub fn ip(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Success { ip } => Some(ip),
            FetchOutcome::Failure { .. } => None,
        }
    }

    /// The failure category, if this call failed
    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self.outcome {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::Failure { category } => Some(category),
        }
    }
}

/// Aggregate outcome of one orchestration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    results: Vec<FetcherResult>,
    consensus_ip: Option<String>,
    has_conflicts: bool,
}

impl FetchResult {
    /// Build the aggregate from per-strategy records, keeping their order
    ///
    /// Exactly one distinct successful IP is a consensus. Two or more is a
    /// conflict. No successes is neither.
    pub fn from_results(results: Vec<FetcherResult>) -> Self {
        let distinct: HashSet<&str> = results.iter().filter_map(FetcherResult::ip).collect();

        let (consensus_ip, has_conflicts) = match distinct.len() {
            0 => (None, false),
            1 => (distinct.into_iter().next().map(str::to_string), false),
            _ => (None, true),
        };

        Self {
            results,
            consensus_ip,
            has_conflicts,
        }
    }

    /// Per-strategy records, in configured strategy order
    pub fn results(&self) -> &[FetcherResult] {
        &self.results
    }

    /// The IP every successful strategy agreed on
    pub fn consensus_ip(&self) -> Option<&str> {
        self.consensus_ip.as_deref()
    }

    /// Whether successful strategies disagreed
    pub fn has_conflicts(&self) -> bool {
        self.has_conflicts
    }

    /// Number of strategies that returned an IP
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }
}
