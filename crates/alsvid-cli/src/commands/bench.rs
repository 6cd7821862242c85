//! Bench command: run the pipeline over a directory of circuits.
//!
//! Each circuit's pipeline is a pure function of its own input and the
//! pass list, so the suite fans out one worker per circuit with no
//! synchronization.

use anyhow::{Context, Result};
use console::style;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

use crate::report::RunReport;
use crate::runner;

use super::optimize::{load_circuit, parse_requests};

/// Execute the bench command.
pub fn execute(dir: &str, passes: &[String], verify: bool) -> Result<()> {
    let requests = parse_requests(passes)?;

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {dir}"))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "qc"))
        .collect();
    files.sort();
    if files.is_empty() {
        anyhow::bail!("No .qc files in {dir}");
    }

    println!(
        "{} Benchmarking {} circuits from {}",
        style("→").cyan().bold(),
        files.len(),
        style(dir).green()
    );

    let results: Vec<(PathBuf, Result<RunReport>)> = files
        .par_iter()
        .map(|path| {
            let report = load_circuit(&path.to_string_lossy())
                .and_then(|circuit| runner::run(&circuit, &requests, verify));
            (path.clone(), report)
        })
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            Ok(report) => {
                let flag = if report.verification_failed() {
                    failures += 1;
                    style("✗").red().bold()
                } else {
                    style("✓").green().bold()
                };
                println!(
                    "{flag} {name}: {} -> {} gates, rotations {} -> {}, depth {} -> {} ({:.2} ms)",
                    report.before.gates,
                    report.after.gates,
                    report.before.rotations,
                    report.after.rotations,
                    report.before.rotation_depth,
                    report.after.rotation_depth,
                    report.elapsed_ms,
                );
            }
            Err(e) => {
                failures += 1;
                println!("{} {name}: {e}", style("✗").red().bold());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} circuit(s) failed");
    }
    Ok(())
}
