//! Contract Test: Result Ordering
//!
//! Constraints verified:
//! - Results follow configured strategy order, not completion order
//! - Ordering is stable across repeated runs and latency permutations
//! - Strategy names are carried through unchanged
//!
//! If this test fails, results are being collected as tasks complete.

mod common;

use common::*;
use ipbot_core::{FetchOrchestrator, FetchStrategy};
use std::sync::Arc;

#[tokio::test]
async fn slowest_first_still_reported_first() {
    let orchestrator = FetchOrchestrator::new(vec![
        ok_after("slow", "10.0.0.1", 120),
        ok_after("medium", "10.0.0.1", 60),
        ok_after("fast", "10.0.0.1", 0),
    ]);

    let result = orchestrator.fetch_all().await;

    assert_eq!(result_names(&result), vec!["slow", "medium", "fast"]);
}

#[tokio::test]
async fn order_is_stable_across_repeated_runs() {
    let orchestrator = FetchOrchestrator::new(vec![
        ok_after("a", "10.0.0.1", 30),
        network_error("b"),
        ok_after("c", "10.0.0.1", 10),
        ok_after("d", "10.0.0.1", 20),
    ]);

    let first = orchestrator.fetch_all().await;
    for _ in 0..5 {
        let again = orchestrator.fetch_all().await;
        assert_eq!(again, first);
    }
    assert_eq!(result_names(&first), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn order_survives_every_latency_permutation() {
    // Every assignment of four distinct delays to four positions
    let delays = [0u64, 15, 30, 45];
    let names = ["ipify", "identme", "ifconfig", "ipinfo"];

    for permutation in permutations(&delays) {
        let strategies: Vec<Arc<dyn FetchStrategy>> = names
            .iter()
            .zip(&permutation)
            .map(|(name, delay)| ok_after(name, "10.0.0.1", *delay))
            .collect();

        let result = FetchOrchestrator::new(strategies).fetch_all().await;

        assert_eq!(
            result_names(&result),
            names,
            "order changed with delays {:?}",
            permutation
        );
    }
}

#[tokio::test]
async fn names_preserved_with_mixed_outcomes() {
    let orchestrator = FetchOrchestrator::new(vec![
        ok("ipify", "1.1.1.1"),
        ok("identme", "1.1.1.1"),
        network_error("ifconfig"),
        ok("ipinfo", "1.1.1.1"),
    ]);

    let result = orchestrator.fetch_all().await;

    assert_eq!(
        result_names(&result),
        vec!["ipify", "identme", "ifconfig", "ipinfo"]
    );
}

fn permutations(items: &[u64]) -> Vec<Vec<u64>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}
