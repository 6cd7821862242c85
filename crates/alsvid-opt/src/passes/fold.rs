//! Phase folding: merge rotations that apply to the same parity.

use alsvid_gf2::{Octant, ParityVec};
use alsvid_ir::{Circuit, Instruction};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::OptResult;
use crate::pass::Pass;
use crate::phase::ParityTracker;

/// Phase-folding pass.
///
/// Sweeps the circuit once left to right, simulating the skeleton's
/// effect on per-wire parities. Every rotation's angle is accumulated into
/// a phase polynomial keyed by the parity it applies to, instead of being
/// kept where it stands; afterwards the skeleton is replayed unchanged and
/// each nonzero accumulated rotation is emitted once, at the first site
/// where its parity occurred (the parity is guaranteed present on that
/// wire at that point).
///
/// A rotation on a complemented parity `1 ⊕ p` is the rotation by the
/// negated angle on `p` up to global phase, so such sites fold into the
/// same key with the sign flipped. Hadamards hand the swept wire a fresh
/// tracking variable, which keeps merging across them sound: parities
/// before and after can never collide.
pub struct PhaseFold;

impl Pass for PhaseFold {
    fn name(&self) -> &'static str {
        "phase-fold"
    }

    fn run(&self, circuit: &Circuit) -> OptResult<Circuit> {
        let mut tracker = ParityTracker::new(circuit.num_qubits());
        let mut poly: FxHashMap<ParityVec, Octant> = FxHashMap::default();
        let mut first_site: FxHashMap<ParityVec, usize> = FxHashMap::default();
        // For each rotation site: the parity key and whether the wire was
        // complemented there.
        let mut sites: Vec<Option<(ParityVec, bool)>> = vec![None; circuit.num_gates()];

        for (i, inst) in circuit.gates().iter().enumerate() {
            if let Some(angle) = inst.phase_angle() {
                let state = tracker.state(inst.qubits[0].index());
                let key = state.linear.clone();
                let signed = if state.complement { -angle } else { angle };
                *poly.entry(key.clone()).or_default() += signed;
                first_site.entry(key.clone()).or_insert(i);
                sites[i] = Some((key, state.complement));
            } else {
                tracker.apply(inst);
            }
        }

        let mut out = Vec::with_capacity(circuit.num_gates());
        for (i, inst) in circuit.gates().iter().enumerate() {
            match &sites[i] {
                Some((key, complemented)) => {
                    if first_site[key] == i {
                        let total = poly[key];
                        if !total.is_zero() {
                            let emit = if *complemented { -total } else { total };
                            out.push(Instruction::phase(emit, inst.qubits[0]));
                        }
                    }
                }
                None => out.push(inst.clone()),
            }
        }

        debug!(
            "phase-fold: {} gates -> {} ({} distinct parities)",
            circuit.num_gates(),
            out.len(),
            poly.len()
        );
        Ok(circuit.with_gates(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Gate, QubitId};

    fn fold(circuit: &Circuit) -> Circuit {
        PhaseFold.run(circuit).unwrap()
    }

    #[test]
    fn test_merges_recurring_parity() {
        // CNOT(0,1) T(1) CNOT(0,1) T(1): the parity on wire 1 after the
        // second CNOT equals the input parity x1 — but the first T sits on
        // x0⊕x1, so nothing merges here...
        let mut c = Circuit::with_wires("no-merge", 2);
        c.cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.count_phase_gates(), 2);

        // ...whereas T(1) CNOT CNOT T(1) sees x1 twice and merges to S.
        let mut c = Circuit::with_wires("merge", 2);
        c.t(QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.count_phase_gates(), 1);
        assert_eq!(out.gates()[0], Instruction::s(QubitId(1)));
        assert_eq!(out.num_gates(), 3);
    }

    #[test]
    fn test_canonical_four_to_three() {
        // Two T gates on a wire whose parity recurs across the CNOTs (the
        // rotations sit on the control side) merge into one S: 4 gates
        // become 3.
        let mut c = Circuit::with_wires("example", 2);
        c.cnot(QubitId(1), QubitId(0))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .cnot(QubitId(1), QubitId(0))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.num_gates(), 3);
        assert_eq!(
            out.gates(),
            &[
                Instruction::cnot(QubitId(1), QubitId(0)),
                Instruction::s(QubitId(1)),
                Instruction::cnot(QubitId(1), QubitId(0)),
            ]
        );
    }

    #[test]
    fn test_full_cancellation_drops_rotations() {
        let mut c = Circuit::with_wires("cancel", 1);
        c.t(QubitId(0))
            .unwrap()
            .phase(Octant::TDG, QubitId(0))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.num_gates(), 0);
    }

    #[test]
    fn test_no_merge_across_hadamard() {
        let mut c = Circuit::with_wires("barrier", 1);
        c.t(QubitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap()
            .t(QubitId(0))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.count_phase_gates(), 2);
        assert_eq!(out.num_gates(), 3);
    }

    #[test]
    fn test_complement_folds_with_negated_angle() {
        // X T X T: the first T sees 1⊕x0 and contributes −1; the second
        // sees x0 and contributes +1; both rotations vanish (the leftover
        // is a global phase).
        let mut c = Circuit::with_wires("affine", 1);
        c.x(QubitId(0))
            .unwrap()
            .t(QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .t(QubitId(0))
            .unwrap();
        let out = fold(&c);
        assert_eq!(out.count_phase_gates(), 0);
        assert_eq!(out.num_gates(), 2);
        assert!(out.gates().iter().all(|i| i.gate == Gate::X));
    }

    #[test]
    fn test_idempotent() {
        let mut c = Circuit::with_wires("idem", 3);
        c.t(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .h(QubitId(2))
            .unwrap()
            .cnot(QubitId(1), QubitId(2))
            .unwrap()
            .s(QubitId(2))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        let once = fold(&c);
        let twice = fold(&once);
        assert_eq!(once.gates(), twice.gates());
    }

    #[test]
    fn test_rotation_count_never_grows() {
        let mut c = Circuit::with_wires("count", 2);
        c.t(QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .t(QubitId(0))
            .unwrap();
        let out = fold(&c);
        assert!(out.count_phase_gates() <= c.count_phase_gates());
    }
}
