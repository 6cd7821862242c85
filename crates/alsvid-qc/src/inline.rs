//! Sub-circuit inlining and lowering to the flat IR.
//!
//! Definitions form a directed call graph. Loading checks it is acyclic
//! (otherwise `CyclicDefinition`), expands definitions callee-first, and
//! lowers the fully inlined main body to a flat [`Circuit`] — the core
//! never sees a call.

use alsvid_gf2::Octant;
use alsvid_ir::{Circuit, Gate, Instruction, QubitId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::ast::{Program, Stmt};
use crate::error::{FormatError, FormatResult};

/// Inline every sub-circuit call and lower the program to a flat circuit.
pub fn lower(name: &str, program: &Program) -> FormatResult<Circuit> {
    let mut circuit = Circuit::new(name);
    let mut wire_ids: FxHashMap<&str, QubitId> = FxHashMap::default();
    for wire in &program.wires {
        if wire_ids.contains_key(wire.as_str()) {
            return Err(FormatError::DuplicateDeclaration(wire.clone()));
        }
        let id = circuit.add_wire(wire.clone());
        wire_ids.insert(wire, id);
    }
    if program.inputs.is_empty() {
        // No `.i` line: every wire is a primary input.
        for wire in &program.wires {
            circuit.mark_input(wire_ids[wire.as_str()])?;
        }
    } else {
        for input in &program.inputs {
            let id = *wire_ids
                .get(input.as_str())
                .ok_or_else(|| FormatError::UnknownWire(input.clone()))?;
            circuit.mark_input(id)?;
        }
    }

    let expanded = expand_definitions(program)?;
    for stmt in &program.body {
        for inst in lower_stmt(stmt, &expanded, &|name| {
            wire_ids.get(name).copied().ok_or(())
        })? {
            circuit.push(inst)?;
        }
    }
    Ok(circuit)
}

/// A definition's body flattened to primitive gates over its formals.
struct Expanded {
    params: Vec<String>,
    gates: Vec<(Gate, Vec<String>)>,
}

/// Expand all definitions callee-first; fails on a call cycle.
fn expand_definitions(program: &Program) -> FormatResult<FxHashMap<String, Expanded>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut nodes: FxHashMap<&str, NodeIndex> = FxHashMap::default();
    for def in &program.definitions {
        if nodes.contains_key(def.name.as_str()) {
            return Err(FormatError::DuplicateDefinition(def.name.clone()));
        }
        let node = graph.add_node(def.name.as_str());
        nodes.insert(&def.name, node);
    }
    for def in &program.definitions {
        for stmt in &def.body {
            if let Some(&callee) = nodes.get(stmt.name.as_str()) {
                graph.add_edge(nodes[def.name.as_str()], callee, ());
            }
        }
    }

    let order = toposort(&graph, None)
        .map_err(|cycle| FormatError::CyclicDefinition(graph[cycle.node_id()].to_string()))?;

    let by_name: FxHashMap<&str, &crate::ast::Definition> = program
        .definitions
        .iter()
        .map(|d| (d.name.as_str(), d))
        .collect();

    let mut expanded: FxHashMap<String, Expanded> = FxHashMap::default();
    // Callees before callers: reverse topological order.
    for node in order.into_iter().rev() {
        let def = by_name[graph[node]];
        let formals: FxHashMap<&str, ()> =
            def.params.iter().map(|p| (p.as_str(), ())).collect();
        let mut gates = Vec::new();
        for stmt in &def.body {
            // Definition bodies are expanded over names, not wire ids.
            gates.extend(expand_stmt_symbolic(stmt, &expanded, &formals)?);
        }
        expanded.insert(
            def.name.clone(),
            Expanded {
                params: def.params.clone(),
                gates,
            },
        );
    }
    Ok(expanded)
}

/// Expand one statement into primitive gates over wire *names*.
fn expand_stmt_symbolic(
    stmt: &Stmt,
    expanded: &FxHashMap<String, Expanded>,
    formals: &FxHashMap<&str, ()>,
) -> FormatResult<Vec<(Gate, Vec<String>)>> {
    for arg in &stmt.args {
        if !formals.contains_key(arg.as_str()) {
            return Err(FormatError::UnknownWire(arg.clone()));
        }
    }
    if let Some(callee) = expanded.get(&stmt.name) {
        if stmt.args.len() != callee.params.len() {
            return Err(FormatError::WrongArity {
                gate: stmt.name.clone(),
                expected: callee.params.len(),
                got: stmt.args.len(),
            });
        }
        let binding: FxHashMap<&str, &str> = callee
            .params
            .iter()
            .map(String::as_str)
            .zip(stmt.args.iter().map(String::as_str))
            .collect();
        return Ok(callee
            .gates
            .iter()
            .map(|(gate, args)| {
                let mapped = args.iter().map(|a| binding[a.as_str()].to_string()).collect();
                (*gate, mapped)
            })
            .collect());
    }
    let gate = gate_by_name(&stmt.name)?;
    check_arity(&stmt.name, gate, stmt.args.len())?;
    Ok(vec![(gate, stmt.args.clone())])
}

/// Lower one main-body statement to instructions over wire ids.
fn lower_stmt(
    stmt: &Stmt,
    expanded: &FxHashMap<String, Expanded>,
    resolve: &dyn Fn(&str) -> Result<QubitId, ()>,
) -> FormatResult<Vec<Instruction>> {
    let resolve_name = |name: &str| -> FormatResult<QubitId> {
        resolve(name).map_err(|()| FormatError::UnknownWire(name.to_string()))
    };

    if let Some(callee) = expanded.get(&stmt.name) {
        if stmt.args.len() != callee.params.len() {
            return Err(FormatError::WrongArity {
                gate: stmt.name.clone(),
                expected: callee.params.len(),
                got: stmt.args.len(),
            });
        }
        let binding: FxHashMap<&str, QubitId> = callee
            .params
            .iter()
            .map(String::as_str)
            .zip(stmt.args.iter())
            .map(|(param, arg)| Ok((param, resolve_name(arg)?)))
            .collect::<FormatResult<_>>()?;
        return Ok(callee
            .gates
            .iter()
            .map(|(gate, args)| {
                Instruction::new(*gate, args.iter().map(|a| binding[a.as_str()]))
            })
            .collect());
    }

    let gate = gate_by_name(&stmt.name)?;
    check_arity(&stmt.name, gate, stmt.args.len())?;
    let qubits = stmt
        .args
        .iter()
        .map(|a| resolve_name(a))
        .collect::<FormatResult<Vec<_>>>()?;
    Ok(vec![Instruction::new(gate, qubits)])
}

fn gate_by_name(name: &str) -> FormatResult<Gate> {
    let gate = match name.to_ascii_lowercase().as_str() {
        "h" => Gate::H,
        "x" | "not" => Gate::X,
        "y" => Gate::Y,
        "z" => Gate::Phase(Octant::Z),
        "s" => Gate::Phase(Octant::S),
        "s*" => Gate::Phase(Octant::SDG),
        "t" => Gate::Phase(Octant::T),
        "t*" => Gate::Phase(Octant::TDG),
        "cnot" | "tof" | "cx" => Gate::Cnot,
        "swap" => Gate::Swap,
        _ => return Err(FormatError::UnknownGate(name.to_string())),
    };
    Ok(gate)
}

fn check_arity(name: &str, gate: Gate, got: usize) -> FormatResult<()> {
    let expected = gate.num_qubits() as usize;
    if got != expected {
        return Err(FormatError::WrongArity {
            gate: name.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn load(source: &str) -> FormatResult<Circuit> {
        lower("test", &parse_program(source)?)
    }

    #[test]
    fn test_lower_flat() {
        let circuit = load(".v a b\n.i a\nBEGIN\nH a\ntof a b\nT b\nEND\n").unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.inputs().len(), 1);
        assert_eq!(circuit.num_gates(), 3);
        assert_eq!(circuit.gates()[1], Instruction::cnot(QubitId(0), QubitId(1)));
    }

    #[test]
    fn test_inline_definition() {
        let source = "\
.v a b c
BEGIN
pair a b
pair b c
END
BEGIN pair(x y)
cnot x y
T y
END
";
        let circuit = load(source).unwrap();
        assert_eq!(circuit.num_gates(), 4);
        assert_eq!(circuit.gates()[2], Instruction::cnot(QubitId(1), QubitId(2)));
        assert_eq!(circuit.gates()[3], Instruction::t(QubitId(2)));
    }

    #[test]
    fn test_nested_definitions_inline_transitively() {
        let source = "\
.v a b
BEGIN
outer a b
END
BEGIN outer(x y)
inner x y
inner y x
END
BEGIN inner(p q)
cnot p q
END
";
        let circuit = load(source).unwrap();
        assert_eq!(circuit.num_gates(), 2);
        assert_eq!(circuit.gates()[0], Instruction::cnot(QubitId(0), QubitId(1)));
        assert_eq!(circuit.gates()[1], Instruction::cnot(QubitId(1), QubitId(0)));
    }

    #[test]
    fn test_cycle_rejected() {
        let source = "\
.v a
BEGIN
loopy a
END
BEGIN loopy(x)
loopy x
END
";
        let err = load(source).unwrap_err();
        assert!(matches!(err, FormatError::CyclicDefinition(_)));
    }

    #[test]
    fn test_mutual_cycle_rejected() {
        let source = "\
.v a
BEGIN
f a
END
BEGIN f(x)
g x
END
BEGIN g(x)
f x
END
";
        let err = load(source).unwrap_err();
        assert!(matches!(err, FormatError::CyclicDefinition(_)));
    }

    #[test]
    fn test_unknown_gate() {
        let err = load(".v a\nBEGIN\nfrobnicate a\nEND\n").unwrap_err();
        assert!(matches!(err, FormatError::UnknownGate(_)));
    }

    #[test]
    fn test_unknown_wire() {
        let err = load(".v a\nBEGIN\nH b\nEND\n").unwrap_err();
        assert!(matches!(err, FormatError::UnknownWire(_)));
    }

    #[test]
    fn test_wrong_arity() {
        let err = load(".v a b\nBEGIN\ntof a\nEND\n").unwrap_err();
        assert!(matches!(err, FormatError::WrongArity { .. }));
    }

    #[test]
    fn test_duplicate_wire() {
        let err = load(".v a a\nBEGIN\nEND\n").unwrap_err();
        assert!(matches!(err, FormatError::DuplicateDeclaration(_)));
    }

    #[test]
    fn test_body_referencing_non_formal_rejected() {
        let source = "\
.v a b
BEGIN
leak a
END
BEGIN leak(x)
cnot x b
END
";
        let err = load(source).unwrap_err();
        assert!(matches!(err, FormatError::UnknownWire(_)));
    }
}
