//! Verify command implementation.

use anyhow::Result;
use console::style;

use alsvid_verify::{Verdict, check_equivalence};

use super::optimize::load_circuit;

/// Execute the verify command: equivalence of two circuit files.
pub fn execute(original: &str, candidate: &str) -> Result<()> {
    let a = load_circuit(original)?;
    let b = load_circuit(candidate)?;

    println!(
        "{} Verifying {} against {}",
        style("→").cyan().bold(),
        style(candidate).green(),
        style(original).green()
    );

    match check_equivalence(&a, &b)? {
        Verdict::Equivalent => {
            println!("{} Equivalent (up to global phase)", style("✓").green().bold());
            Ok(())
        }
        Verdict::NotEquivalent(witness) => {
            println!("{} Not equivalent:", style("✗").red().bold());
            print!("{witness}");
            anyhow::bail!("circuits are not equivalent")
        }
        Verdict::Inconclusive(witness) => {
            println!("{} Inconclusive:", style("?").yellow().bold());
            print!("{witness}");
            anyhow::bail!("verification inconclusive")
        }
    }
}
