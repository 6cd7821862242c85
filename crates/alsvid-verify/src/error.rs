//! Error types for the verification engine.

use thiserror::Error;

/// Errors that can occur setting up an equivalence check.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// The two circuits do not declare the same primary inputs (or wire
    /// sets), so there is no unitary action to compare.
    #[error("Input mismatch: {0}")]
    InputMismatch(String),
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
