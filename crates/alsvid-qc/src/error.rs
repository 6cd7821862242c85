//! Error types for the `.qc` front end.

use thiserror::Error;

/// Errors that can occur parsing, inlining, or lowering `.qc` sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: unrecognized input")]
    LexerError {
        /// 1-based source line.
        line: usize,
    },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// 1-based source line.
        line: usize,
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// A wire was declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// A sub-circuit was defined twice.
    #[error("Duplicate sub-circuit definition: {0}")]
    DuplicateDefinition(String),

    /// A gate or call references an unknown wire.
    #[error("Unknown wire: {0}")]
    UnknownWire(String),

    /// A statement names neither a gate nor a defined sub-circuit.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Wrong number of operands.
    #[error("'{gate}' expects {expected} operands, got {got}")]
    WrongArity {
        /// The gate or sub-circuit name.
        gate: String,
        /// Required operand count.
        expected: usize,
        /// Provided operand count.
        got: usize,
    },

    /// The sub-circuit call graph has a cycle; it cannot be inlined.
    #[error("Cyclic sub-circuit definition involving '{0}'")]
    CyclicDefinition(String),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Circuit(#[from] alsvid_ir::IrError),
}

/// Result type for front-end operations.
pub type FormatResult<T> = Result<T, FormatError>;
