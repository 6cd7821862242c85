//! CNOT-network resynthesis: rebuild the two-wire skeleton at near-minimal
//! gate count.

use alsvid_gf2::Gf2Matrix;
use alsvid_ir::{Circuit, Instruction, QubitId};
use tracing::debug;

use crate::error::OptResult;
use crate::pass::Pass;
use crate::phase::{Segment, SegmentPhases, analyze_linear_segment, segments};
use crate::synth::{realize_parity, synth_transform};

const PASS: &str = "linear-resynthesize";

/// Linear-network resynthesis.
///
/// For each maximal CNOT+rotation segment: extract the required
/// (parity, rotation) pairs and the required final linear map, then throw
/// the original skeleton away and synthesize a fresh one. Each required
/// parity is produced on a wire by folding the solving wire subset onto
/// its lowest-index member (one CNOT per extra wire — the minimal number
/// of row operations from the current state), with the rotation emitted
/// the moment its parity is realized. Afterwards the accumulated wire
/// state is reconciled to the required output map by Gaussian elimination.
///
/// The realized GF(2) matrix equals the required output map exactly; an
/// identity map with an empty phase polynomial synthesizes to zero gates.
pub struct LinearResynth;

impl Pass for LinearResynth {
    fn name(&self) -> &'static str {
        PASS
    }

    fn run(&self, circuit: &Circuit) -> OptResult<Circuit> {
        let n = circuit.num_qubits();
        let mut out = Vec::with_capacity(circuit.num_gates());
        for segment in segments(circuit.gates()) {
            match segment {
                Segment::Opaque(gates) => out.extend_from_slice(gates),
                Segment::Linear(gates) => out.extend(resynth_segment(n, gates)?),
            }
        }
        Ok(circuit.with_gates(out))
    }
}

fn resynth_segment(n: usize, gates: &[Instruction]) -> OptResult<Vec<Instruction>> {
    let SegmentPhases { terms, output } = analyze_linear_segment(n, gates);

    let mut state = Gf2Matrix::identity(n);
    let mut out = Vec::new();
    for term in &terms {
        let (ops, wire) = realize_parity(PASS, &mut state, &term.parity)?;
        for (control, target) in ops {
            out.push(Instruction::cnot(QubitId::from(control), QubitId::from(target)));
        }
        out.push(Instruction::phase(term.angle, QubitId::from(wire)));
    }
    for (control, target) in synth_transform(PASS, &state, &output)? {
        out.push(Instruction::cnot(QubitId::from(control), QubitId::from(target)));
    }

    debug!("{PASS}: segment of {} gates -> {}", gates.len(), out.len());
    Ok(out)
}
