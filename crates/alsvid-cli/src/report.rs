//! The optimization run report.

use std::fmt;

use alsvid_ir::CircuitStats;
use alsvid_verify::Verdict;
use serde::Serialize;

/// Everything a single pipeline run produced: statistics before and
/// after, the pass list that ran, timing, and the verification verdict if
/// one was requested.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Circuit name.
    pub circuit: String,
    /// Pass names, in the order they ran.
    pub passes: Vec<String>,
    /// Statistics of the input circuit.
    pub before: CircuitStats,
    /// Statistics of the final circuit.
    pub after: CircuitStats,
    /// Outcome of the post-hoc equivalence check, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verdict>,
    /// Wall-clock time of the pass chain, in milliseconds.
    pub elapsed_ms: f64,
}

impl RunReport {
    /// Whether a requested verification failed or stalled.
    pub fn verification_failed(&self) -> bool {
        matches!(
            self.verification,
            Some(Verdict::NotEquivalent(_)) | Some(Verdict::Inconclusive(_))
        )
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit: {}", self.circuit)?;
        writeln!(f, "passes:  {}", self.passes.join(" → "))?;
        writeln!(f, "before:  {}", self.before)?;
        writeln!(f, "after:   {}", self.after)?;
        if let Some(verdict) = &self.verification {
            match verdict {
                Verdict::Equivalent => writeln!(f, "verified: equivalent")?,
                Verdict::NotEquivalent(witness) => {
                    writeln!(f, "verified: NOT EQUIVALENT")?;
                    write!(f, "{witness}")?;
                }
                Verdict::Inconclusive(witness) => {
                    writeln!(f, "verified: inconclusive")?;
                    write!(f, "{witness}")?;
                }
            }
        }
        write!(f, "elapsed: {:.2} ms", self.elapsed_ms)
    }
}
