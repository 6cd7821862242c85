//! Rotation-depth scheduling: partition phase terms into parallel layers.

use alsvid_gf2::{Gf2Matrix, ParityVec};
use alsvid_ir::{Circuit, Instruction, QubitId};
use tracing::debug;

use crate::error::OptResult;
use crate::pass::Pass;
use crate::phase::{PhaseTerm, Segment, SegmentPhases, analyze_linear_segment, segments};
use crate::synth::{complete_basis, insert_echelon, synth_transform};

const PASS: &str = "rotation-depth-schedule";

/// Rotation-depth scheduler.
///
/// Works on maximal CNOT+rotation segments (anything else is a barrier and
/// replays unchanged). Within a segment the rotations all commute, so they
/// can be partitioned freely; the scheduler groups them into the fewest
/// layers whose parities can all sit on wires at once, then resynthesizes
/// the segment layer by layer.
///
/// A set of parities is jointly realizable exactly when it is linearly
/// independent: an independent set extends to a basis, i.e. an invertible
/// wire relabeling reachable by CNOTs, which puts every parity of the set
/// on its own wire simultaneously. Layers are built greedily, admitting
/// among the still-realizable terms the one with the smallest Hamming
/// weight (cheapest to realize), breaking ties by first occurrence.
pub struct RotationSchedule;

impl Pass for RotationSchedule {
    fn name(&self) -> &'static str {
        PASS
    }

    fn run(&self, circuit: &Circuit) -> OptResult<Circuit> {
        let n = circuit.num_qubits();
        let mut out = Vec::with_capacity(circuit.num_gates());
        for segment in segments(circuit.gates()) {
            match segment {
                Segment::Opaque(gates) => out.extend_from_slice(gates),
                Segment::Linear(gates) => out.extend(schedule_segment(n, gates)?),
            }
        }
        Ok(circuit.with_gates(out))
    }
}

/// Partition the phase terms of one segment into layers.
fn build_layers(mut remaining: Vec<PhaseTerm>) -> Vec<Vec<PhaseTerm>> {
    let mut layers = Vec::new();
    while !remaining.is_empty() {
        let mut echelon: Vec<ParityVec> = Vec::new();
        let mut layer: Vec<PhaseTerm> = Vec::new();
        loop {
            // Pick the lightest term still independent of the layer.
            let mut best: Option<usize> = None;
            for (i, term) in remaining.iter().enumerate() {
                let mut probe = echelon.clone();
                if insert_echelon(&mut probe, term.parity.clone())
                    && best.is_none_or(|b| term.parity.weight() < remaining[b].parity.weight())
                {
                    best = Some(i);
                }
            }
            let Some(i) = best else { break };
            let term = remaining.remove(i);
            insert_echelon(&mut echelon, term.parity.clone());
            layer.push(term);
        }
        layers.push(layer);
    }
    layers
}

fn schedule_segment(n: usize, gates: &[Instruction]) -> OptResult<Vec<Instruction>> {
    let SegmentPhases { terms, output } = analyze_linear_segment(n, gates);
    let layers = build_layers(terms);
    debug!(
        "{PASS}: segment of {} gates -> {} layers",
        gates.len(),
        layers.len()
    );

    let mut state = Gf2Matrix::identity(n);
    let mut out = Vec::new();
    for layer in &layers {
        let parities: Vec<ParityVec> = layer.iter().map(|t| t.parity.clone()).collect();
        let basis = complete_basis(&parities, &state);
        for (control, target) in synth_transform(PASS, &state, &basis)? {
            out.push(Instruction::cnot(QubitId::from(control), QubitId::from(target)));
        }
        // The layer's parities occupy wires 0..k; rotate them in parallel.
        for (wire, term) in layer.iter().enumerate() {
            out.push(Instruction::phase(term.angle, QubitId::from(wire)));
        }
        state = basis;
    }
    for (control, target) in synth_transform(PASS, &state, &output)? {
        out.push(Instruction::cnot(QubitId::from(control), QubitId::from(target)));
    }
    Ok(out)
}
