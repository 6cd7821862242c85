//! Stats command implementation.

use anyhow::Result;
use console::style;

use alsvid_ir::CircuitStats;

use super::optimize::load_circuit;

/// Execute the stats command.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    let stats = CircuitStats::of(&circuit);
    println!("{} {}", style("→").cyan().bold(), style(input).green());
    println!("{stats}");
    Ok(())
}
