//! Derived circuit statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::circuit::Circuit;

/// Pure summary of a circuit value: gate counts by kind, wire count, and
/// rotation-depth. Computable over any circuit, before or after passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Declared wire count.
    pub wires: usize,
    /// Primary-input count.
    pub inputs: usize,
    /// Total gate count.
    pub gates: usize,
    /// Two-wire gate count.
    pub two_qubit: usize,
    /// Non-Clifford rotation count (odd multiples of π/4).
    pub rotations: usize,
    /// Number of sequential non-Clifford rotation layers.
    pub rotation_depth: usize,
    /// Gate counts keyed by canonical gate name, sorted for stable output.
    pub counts: BTreeMap<String, usize>,
}

impl CircuitStats {
    /// Compute the statistics of a circuit.
    pub fn of(circuit: &Circuit) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut two_qubit = 0;
        let mut rotations = 0;

        // Per-wire rotation layer counter; a two-wire gate synchronizes its
        // operands, an odd rotation opens a new layer on its wire.
        let mut depth = vec![0_usize; circuit.num_qubits()];

        for inst in circuit.gates() {
            *counts.entry(inst.gate.name().to_string()).or_default() += 1;
            if inst.gate.num_qubits() == 2 {
                two_qubit += 1;
            }
            let joined = inst
                .qubits
                .iter()
                .map(|q| depth[q.index()])
                .max()
                .unwrap_or(0);
            let after = if inst.gate.is_proper_rotation() {
                rotations += 1;
                joined + 1
            } else {
                joined
            };
            for q in &inst.qubits {
                depth[q.index()] = after;
            }
        }

        CircuitStats {
            wires: circuit.num_qubits(),
            inputs: circuit.inputs().len(),
            gates: circuit.num_gates(),
            two_qubit,
            rotations,
            rotation_depth: depth.into_iter().max().unwrap_or(0),
            counts,
        }
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} wires ({} inputs), {} gates ({} two-qubit)",
            self.wires, self.inputs, self.gates, self.two_qubit
        )?;
        writeln!(
            f,
            "{} rotations, rotation-depth {}",
            self.rotations, self.rotation_depth
        )?;
        let mut first = true;
        for (name, count) in &self.counts {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {count}")?;
            first = false;
        }
        Ok(())
    }
}
