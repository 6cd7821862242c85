//! Error types for the IR crate.
//!
//! Everything here is a malformed-circuit condition: the core refuses such
//! a circuit before any pass runs.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur building or validating circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate references a wire the circuit never declared.
    #[error("Gate '{gate}' references undeclared wire {wire}")]
    UndeclaredWire {
        /// Name of the offending gate.
        gate: String,
        /// The undeclared wire.
        wire: QubitId,
    },

    /// Gate operand count does not match the gate's arity.
    #[error("Gate '{gate}' requires {expected} wires, got {got}")]
    ArityMismatch {
        /// Name of the offending gate.
        gate: String,
        /// Required operand count.
        expected: u32,
        /// Provided operand count.
        got: usize,
    },

    /// The same wire appears twice in one gate application.
    #[error("Gate '{gate}' applied with duplicate wire {wire}")]
    DuplicateOperand {
        /// Name of the offending gate.
        gate: String,
        /// The repeated wire.
        wire: QubitId,
    },

    /// An input marker references an undeclared wire.
    #[error("Primary input marker references undeclared wire {wire}")]
    UndeclaredInput {
        /// The undeclared wire.
        wire: QubitId,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
