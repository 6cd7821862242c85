//! Error types for the optimization engine.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur running optimization passes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptError {
    /// The input circuit failed wire validation; nothing was run.
    #[error("Malformed circuit: {0}")]
    Malformed(#[from] IrError),

    /// A pass was requested under a name the engine does not know.
    #[error("Unknown pass '{0}' (expected one of: phase-fold, rotation-depth-schedule, linear-resynthesize, simplify)")]
    UnknownPass(String),

    /// Network synthesis reached a state it cannot be in for a valid
    /// input; indicates a bug in the caller's extraction, not the circuit.
    #[error("Synthesis invariant violated in pass '{pass}': {detail}")]
    Synthesis {
        /// The pass that failed.
        pass: &'static str,
        /// What went wrong.
        detail: String,
    },
}

/// Result type for optimization operations.
pub type OptResult<T> = Result<T, OptError>;
