//! Emitter: render a flat circuit back to `.qc` text.

use alsvid_ir::{Circuit, Gate, Instruction};
use std::fmt::Write;

/// Render a circuit as `.qc` source.
///
/// Rotations are spelled with the named phase gates; the two octants with
/// no single-gate name use the two-gate spellings `Z T*` (3·π/4) and
/// `Z T` (5·π/4). The zero rotation emits nothing.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();

    write!(out, ".v").unwrap();
    for qubit in circuit.qubits() {
        write!(out, " {}", qubit.name).unwrap();
    }
    out.push('\n');

    write!(out, ".i").unwrap();
    for &input in circuit.inputs() {
        write!(out, " {}", circuit.wire_name(input)).unwrap();
    }
    out.push('\n');

    out.push_str("BEGIN\n");
    for inst in circuit.gates() {
        emit_instruction(&mut out, circuit, inst);
    }
    out.push_str("END\n");
    out
}

fn emit_instruction(out: &mut String, circuit: &Circuit, inst: &Instruction) {
    let spellings: &[&str] = match inst.gate {
        Gate::H => &["H"],
        Gate::X => &["X"],
        Gate::Y => &["Y"],
        Gate::Cnot => &["tof"],
        Gate::Swap => &["swap"],
        Gate::Phase(m) => match m.value() {
            0 => &[],
            1 => &["T"],
            2 => &["S"],
            3 => &["Z", "T*"],
            4 => &["Z"],
            5 => &["Z", "T"],
            6 => &["S*"],
            7 => &["T*"],
            _ => unreachable!("octant out of range"),
        },
    };
    for spelling in spellings {
        write!(out, "{spelling}").unwrap();
        for &q in &inst.qubits {
            write!(out, " {}", circuit.wire_name(q)).unwrap();
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_gf2::Octant;
    use alsvid_ir::QubitId;

    #[test]
    fn test_emit_basic() {
        let mut circuit = Circuit::with_wires("c", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        let text = emit(&circuit);
        assert_eq!(
            text,
            ".v q0 q1\n.i q0 q1\nBEGIN\nH q0\ntof q0 q1\nT q1\nEND\n"
        );
    }

    #[test]
    fn test_emit_compound_octants() {
        let mut circuit = Circuit::with_wires("c", 1);
        circuit.phase(Octant::new(3), QubitId(0)).unwrap();
        let text = emit(&circuit);
        assert!(text.contains("Z q0\nT* q0\n"));
    }

    #[test]
    fn test_emit_zero_rotation_drops() {
        let mut circuit = Circuit::with_wires("c", 1);
        circuit.phase(Octant::ZERO, QubitId(0)).unwrap();
        let text = emit(&circuit);
        assert_eq!(text, ".v q0\n.i q0\nBEGIN\nEND\n");
    }
}
