//! Peephole simplification: local cancellation and commutation.

use alsvid_ir::{Circuit, Gate, Instruction};
use tracing::debug;

use crate::error::OptResult;
use crate::pass::Pass;

/// Peephole simplifier.
///
/// Cancels pairs of mutually inverse gates and merges same-wire rotation
/// pairs, where the pair is adjacent up to commuting past intervening
/// gates (disjoint wires, rotations past CNOT controls, X past CNOT
/// targets, CNOTs sharing only a control or only a target). Every rewrite
/// strictly reduces the gate count, so iterating to a fixed point
/// terminates.
pub struct Simplify;

impl Pass for Simplify {
    fn name(&self) -> &'static str {
        "simplify"
    }

    fn run(&self, circuit: &Circuit) -> OptResult<Circuit> {
        let mut gates = circuit.gates().to_vec();
        while let Some(next) = rewrite_once(&gates) {
            gates = next;
        }
        debug!(
            "simplify: {} gates -> {}",
            circuit.num_gates(),
            gates.len()
        );
        Ok(circuit.with_gates(gates))
    }
}

/// Apply the first available rewrite; `None` at the fixed point.
fn rewrite_once(gates: &[Instruction]) -> Option<Vec<Instruction>> {
    for i in 0..gates.len() {
        for j in i + 1..gates.len() {
            if let Some(rewrite) = match_pair(&gates[i], &gates[j]) {
                let mut out = Vec::with_capacity(gates.len());
                out.extend_from_slice(&gates[..i]);
                if let Rewrite::Merge(inst) = rewrite {
                    out.push(inst);
                }
                out.extend_from_slice(&gates[i + 1..j]);
                out.extend_from_slice(&gates[j + 1..]);
                return Some(out);
            }
            if !commutes(&gates[i], &gates[j]) {
                break;
            }
        }
    }
    None
}

enum Rewrite {
    /// Both gates vanish.
    Cancel,
    /// Both gates are replaced by one, at the first gate's position.
    Merge(Instruction),
}

/// Try to cancel or merge a pair of gates on the same wires.
fn match_pair(a: &Instruction, b: &Instruction) -> Option<Rewrite> {
    if let (Gate::Phase(x), Gate::Phase(y)) = (a.gate, b.gate) {
        if a.qubits == b.qubits {
            let sum = x + y;
            return Some(if sum.is_zero() {
                Rewrite::Cancel
            } else {
                Rewrite::Merge(Instruction::phase(sum, a.qubits[0]))
            });
        }
        return None;
    }
    let same_wires = a.qubits == b.qubits
        || (a.gate == Gate::Swap && b.gate == Gate::Swap && {
            let mut rev = b.qubits.clone();
            rev.reverse();
            a.qubits == rev
        });
    (same_wires && b.gate == a.gate.inverse()).then_some(Rewrite::Cancel)
}

/// Whether two gates can be reordered without changing the circuit.
fn commutes(a: &Instruction, b: &Instruction) -> bool {
    if a.disjoint_from(b) {
        return true;
    }
    match (a.gate, b.gate) {
        // Z-rotations commute with each other and with a CNOT's control.
        (Gate::Phase(_), Gate::Phase(_)) => a.qubits == b.qubits,
        (Gate::Phase(_), Gate::Cnot) => a.qubits[0] == b.control(),
        (Gate::Cnot, Gate::Phase(_)) => b.qubits[0] == a.control(),
        // X commutes through a CNOT's target.
        (Gate::X, Gate::Cnot) => a.qubits[0] == b.target(),
        (Gate::Cnot, Gate::X) => b.qubits[0] == a.target(),
        // CNOTs sharing only the control, or only the target, commute.
        (Gate::Cnot, Gate::Cnot) => {
            (a.control() == b.control()) != (a.target() == b.target())
                && a.control() != b.target()
                && b.control() != a.target()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_gf2::Octant;
    use alsvid_ir::QubitId;

    fn simplify(circuit: &Circuit) -> Circuit {
        Simplify.run(circuit).unwrap()
    }

    #[test]
    fn test_adjacent_cnot_pair_cancels() {
        let mut c = Circuit::with_wires("cx", 2);
        c.cnot(QubitId(0), QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap();
        assert_eq!(simplify(&c).num_gates(), 0);
    }

    #[test]
    fn test_mismatched_cnots_kept() {
        let mut c = Circuit::with_wires("cx", 2);
        c.cnot(QubitId(0), QubitId(1))
            .unwrap()
            .cnot(QubitId(1), QubitId(0))
            .unwrap();
        assert_eq!(simplify(&c).num_gates(), 2);
    }

    #[test]
    fn test_rotation_inverse_pair_cancels() {
        let mut c = Circuit::with_wires("rz", 1);
        c.t(QubitId(0))
            .unwrap()
            .phase(Octant::TDG, QubitId(0))
            .unwrap();
        assert_eq!(simplify(&c).num_gates(), 0);
    }

    #[test]
    fn test_rotations_merge() {
        let mut c = Circuit::with_wires("merge", 1);
        c.t(QubitId(0)).unwrap().t(QubitId(0)).unwrap();
        let out = simplify(&c);
        assert_eq!(out.gates(), &[Instruction::s(QubitId(0))]);
    }

    #[test]
    fn test_cancellation_through_disjoint_gate() {
        let mut c = Circuit::with_wires("through", 3);
        c.h(QubitId(0))
            .unwrap()
            .x(QubitId(2))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        let out = simplify(&c);
        assert_eq!(out.gates(), &[Instruction::x(QubitId(2))]);
    }

    #[test]
    fn test_rotation_commutes_past_cnot_control() {
        // T(0) CNOT(0,1) T†(0): the rotations meet across the control.
        let mut c = Circuit::with_wires("control", 2);
        c.t(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .phase(Octant::TDG, QubitId(0))
            .unwrap();
        let out = simplify(&c);
        assert_eq!(out.gates(), &[Instruction::cnot(QubitId(0), QubitId(1))]);
    }

    #[test]
    fn test_rotation_blocked_by_cnot_target() {
        let mut c = Circuit::with_wires("target", 2);
        c.t(QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .phase(Octant::TDG, QubitId(1))
            .unwrap();
        assert_eq!(simplify(&c).num_gates(), 3);
    }

    #[test]
    fn test_swap_cancels_reversed_operands() {
        let mut c = Circuit::with_wires("swap", 2);
        c.swap(QubitId(0), QubitId(1))
            .unwrap()
            .swap(QubitId(1), QubitId(0))
            .unwrap();
        assert_eq!(simplify(&c).num_gates(), 0);
    }

    #[test]
    fn test_idempotent_at_fixed_point() {
        let mut c = Circuit::with_wires("idem", 2);
        c.h(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .h(QubitId(0))
            .unwrap();
        let once = simplify(&c);
        let twice = simplify(&once);
        assert_eq!(once.gates(), twice.gates());
    }

    #[test]
    fn test_chain_collapses() {
        // X X X X on one wire vanishes entirely.
        let mut c = Circuit::with_wires("chain", 1);
        for _ in 0..4 {
            c.x(QubitId(0)).unwrap();
        }
        assert_eq!(simplify(&c).num_gates(), 0);
    }
}
