//! Parsed representation of a `.qc` source file, before inlining.

/// A gate application or sub-circuit call, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    /// Gate or sub-circuit name.
    pub name: String,
    /// Operand names.
    pub args: Vec<String>,
}

/// A named sub-circuit definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The sub-circuit's name.
    pub name: String,
    /// Formal parameters; the body may reference only these.
    pub params: Vec<String>,
    /// The body statements.
    pub body: Vec<Stmt>,
}

/// A whole `.qc` program: declarations, the main body, and sub-circuit
/// definitions (a directed graph of calls, inlined before the core sees
/// the circuit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Declared wires, in order.
    pub wires: Vec<String>,
    /// Declared primary inputs; empty means every wire is an input.
    pub inputs: Vec<String>,
    /// Main body statements.
    pub body: Vec<Stmt>,
    /// Sub-circuit definitions.
    pub definitions: Vec<Definition>,
}
