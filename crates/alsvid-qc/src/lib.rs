//! Alsvid `.qc` Front End
//!
//! Loads the `.qc` circuit description format into the flat Alsvid IR and
//! renders circuits back out. This crate is the only place circuit *text*
//! exists: the optimizer and verifier operate purely on
//! [`alsvid_ir::Circuit`] values.
//!
//! # Format
//!
//! ```text
//! .v a b c        # declared wires, in order
//! .i a b          # primary inputs (omitted: every wire is an input)
//! BEGIN
//! H a
//! tof a b         # controlled-NOT, control first
//! T b
//! sub a c         # sub-circuit call
//! END
//! BEGIN sub(x y)
//! cnot x y
//! S* y
//! END
//! ```
//!
//! Sub-circuit definitions form a directed call graph; loading checks it
//! is acyclic (`CyclicDefinition` otherwise) and inlines calls
//! topologically, so the core always receives a flat gate sequence.
//!
//! Additional formats implement the [`CircuitFormat`] capability trait
//! {parse, render, statistics}; [`DotQc`] is the built-in instance.

pub mod ast;
pub mod emitter;
pub mod error;
pub mod format;
pub mod inline;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{FormatError, FormatResult};
pub use format::{CircuitFormat, DotQc};

use alsvid_ir::Circuit;

/// Parse `.qc` source into a flat circuit.
pub fn parse(source: &str) -> FormatResult<Circuit> {
    DotQc.parse(source)
}
