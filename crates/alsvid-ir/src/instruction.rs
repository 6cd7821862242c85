//! Gate applications: a gate paired with its wire operands.

use alsvid_gf2::Octant;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::Gate;
use crate::qubit::QubitId;

/// A single gate application in a flat circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// The wires it acts on, in gate-operand order (control before target
    /// for [`Gate::Cnot`]).
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create an instruction from a gate and operands.
    pub fn new(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Hadamard on `q`.
    pub fn h(q: QubitId) -> Self {
        Self::new(Gate::H, [q])
    }

    /// Pauli-X on `q`.
    pub fn x(q: QubitId) -> Self {
        Self::new(Gate::X, [q])
    }

    /// Pauli-Y on `q`.
    pub fn y(q: QubitId) -> Self {
        Self::new(Gate::Y, [q])
    }

    /// Rotation by `angle` on `q`.
    pub fn phase(angle: Octant, q: QubitId) -> Self {
        Self::new(Gate::Phase(angle), [q])
    }

    /// T gate on `q`.
    pub fn t(q: QubitId) -> Self {
        Self::phase(Octant::T, q)
    }

    /// S gate on `q`.
    pub fn s(q: QubitId) -> Self {
        Self::phase(Octant::S, q)
    }

    /// Z gate on `q`.
    pub fn z(q: QubitId) -> Self {
        Self::phase(Octant::Z, q)
    }

    /// Controlled-NOT with `control` and `target`.
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Self::new(Gate::Cnot, [control, target])
    }

    /// Swap of two wires.
    pub fn swap(a: QubitId, b: QubitId) -> Self {
        Self::new(Gate::Swap, [a, b])
    }

    /// True for controlled-NOT.
    #[inline]
    pub fn is_cnot(&self) -> bool {
        self.gate == Gate::Cnot
    }

    /// True for any phase gate.
    #[inline]
    pub fn is_phase(&self) -> bool {
        matches!(self.gate, Gate::Phase(_))
    }

    /// The rotation angle, for phase gates.
    #[inline]
    pub fn phase_angle(&self) -> Option<Octant> {
        self.gate.phase_angle()
    }

    /// The control wire of a controlled-NOT.
    pub fn control(&self) -> QubitId {
        debug_assert!(self.is_cnot());
        self.qubits[0]
    }

    /// The target wire of a controlled-NOT.
    pub fn target(&self) -> QubitId {
        debug_assert!(self.is_cnot());
        self.qubits[1]
    }

    /// Whether the instruction touches wire `q`.
    pub fn acts_on(&self, q: QubitId) -> bool {
        self.qubits.contains(&q)
    }

    /// Whether two instructions touch disjoint wire sets.
    pub fn disjoint_from(&self, other: &Instruction) -> bool {
        !self.qubits.iter().any(|q| other.acts_on(*q))
    }

    /// The structurally inverted instruction (same operands, inverse gate).
    pub fn inverse(&self) -> Instruction {
        Instruction {
            gate: self.gate.inverse(),
            qubits: self.qubits.clone(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate.name())?;
        for q in &self.qubits {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cnot_operands() {
        let cx = Instruction::cnot(QubitId(0), QubitId(1));
        assert!(cx.is_cnot());
        assert_eq!(cx.control(), QubitId(0));
        assert_eq!(cx.target(), QubitId(1));
    }

    #[test]
    fn test_disjoint() {
        let a = Instruction::cnot(QubitId(0), QubitId(1));
        let b = Instruction::t(QubitId(2));
        let c = Instruction::t(QubitId(1));
        assert!(a.disjoint_from(&b));
        assert!(!a.disjoint_from(&c));
    }

    #[test]
    fn test_inverse() {
        let t = Instruction::t(QubitId(0));
        assert_eq!(t.inverse(), Instruction::phase(Octant::TDG, QubitId(0)));
        let cx = Instruction::cnot(QubitId(0), QubitId(1));
        assert_eq!(cx.inverse(), cx);
    }

    #[test]
    fn test_display() {
        let cx = Instruction::cnot(QubitId(0), QubitId(1));
        assert_eq!(format!("{cx}"), "cnot q0 q1");
    }
}
