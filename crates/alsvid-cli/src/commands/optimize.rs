//! Optimize command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use alsvid_opt::PassRequest;
use alsvid_qc::{CircuitFormat, DotQc};

use crate::runner;

/// Execute the optimize command.
pub fn execute(
    input: &str,
    output: Option<&str>,
    passes: &[String],
    verify: bool,
    export: Option<&str>,
) -> Result<()> {
    let requests = parse_requests(passes)?;

    println!(
        "{} Optimizing {} ({})",
        style("→").cyan().bold(),
        style(input).green(),
        requests
            .iter()
            .map(PassRequest::name)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let circuit = load_circuit(input)?;
    let (report, optimized) = runner::run_with_circuit(&circuit, &requests, verify)?;

    println!("{report}");

    if let Some(path) = output {
        fs::write(path, DotQc.render(&optimized))
            .with_context(|| format!("Failed to write file: {path}"))?;
        println!("  Output: {}", style(path).green());
    }

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {path}"))?;
        println!("  Report: {}", style(path).green());
    }

    if report.verification_failed() {
        anyhow::bail!("verification did not certify the rewrite");
    }

    println!("{} Optimization complete", style("✓").green().bold());
    Ok(())
}

/// Parse pass names into requests; the default chain when none are given.
pub fn parse_requests(passes: &[String]) -> Result<Vec<PassRequest>> {
    if passes.is_empty() {
        return Ok(vec![
            PassRequest::PhaseFold,
            PassRequest::RotationDepthSchedule,
            PassRequest::Simplify,
        ]);
    }
    passes
        .iter()
        .flat_map(|chunk| chunk.split(','))
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().parse().map_err(anyhow::Error::from))
        .collect()
}

/// Load a `.qc` circuit from a file.
pub fn load_circuit(path: &str) -> Result<alsvid_ir::Circuit> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let circuit = DotQc
        .parse(&source)
        .map_err(|e| anyhow::anyhow!("Parse error in {path}: {e}"))?;
    Ok(match path_obj.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => circuit.renamed(stem),
        None => circuit,
    })
}
