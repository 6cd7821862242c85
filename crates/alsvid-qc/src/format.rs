//! Front-end format capability.
//!
//! The core depends only on the in-memory circuit value; each supported
//! textual format implements this trait once, and callers pick a format
//! without the core ever touching circuit text.

use alsvid_ir::{Circuit, CircuitStats};

use crate::emitter;
use crate::error::FormatResult;
use crate::inline;
use crate::parser;

/// A circuit text format: parse, render, and derived statistics.
pub trait CircuitFormat {
    /// Format name, for diagnostics and format selection.
    fn name(&self) -> &'static str;

    /// Parse source text into a flat circuit (sub-circuits inlined).
    fn parse(&self, source: &str) -> FormatResult<Circuit>;

    /// Render a circuit as source text.
    fn render(&self, circuit: &Circuit) -> String;

    /// Statistics of a source file, without keeping the circuit.
    fn statistics(&self, source: &str) -> FormatResult<CircuitStats> {
        Ok(CircuitStats::of(&self.parse(source)?))
    }
}

/// The `.qc` circuit description format.
pub struct DotQc;

impl CircuitFormat for DotQc {
    fn name(&self) -> &'static str {
        "qc"
    }

    fn parse(&self, source: &str) -> FormatResult<Circuit> {
        let program = parser::parse_program(source)?;
        inline::lower("main", &program)
    }

    fn render(&self, circuit: &Circuit) -> String {
        emitter::emit(circuit)
    }
}
