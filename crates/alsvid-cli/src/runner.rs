//! The thin runner: (circuit, pass list, verify flag) → report.
//!
//! Timing, statistics packaging, and verification dispatch live here, at
//! the boundary; the optimizer and the verifier stay pure.

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use alsvid_ir::{Circuit, CircuitStats};
use alsvid_opt::{PassManager, PassRequest};
use alsvid_verify::check_equivalence;

use crate::report::RunReport;

/// Run the pass chain over one circuit, optionally verifying the result
/// against the original, and package the outcome.
pub fn run(circuit: &Circuit, requests: &[PassRequest], verify: bool) -> Result<RunReport> {
    run_with_circuit(circuit, requests, verify).map(|(report, _)| report)
}

/// Run the chain and also return the final circuit (for `--output`).
pub fn run_with_circuit(
    circuit: &Circuit,
    requests: &[PassRequest],
    verify: bool,
) -> Result<(RunReport, Circuit)> {
    let before = CircuitStats::of(circuit);

    let started = Instant::now();
    let optimized = PassManager::from_requests(requests).run(circuit)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;

    let verification = if verify {
        Some(check_equivalence(circuit, &optimized)?)
    } else {
        None
    };

    info!(
        "'{}': {} gates -> {} in {:.2} ms",
        circuit.name(),
        before.gates,
        optimized.num_gates(),
        elapsed_ms
    );

    let report = RunReport {
        circuit: circuit.name().to_string(),
        passes: requests.iter().map(|r| r.name().to_string()).collect(),
        before,
        after: CircuitStats::of(&optimized),
        verification,
        elapsed_ms,
    };
    Ok((report, optimized))
}
