//! Forward-sweep phase-polynomial extraction.
//!
//! Two views of the same idea live here. [`ParityTracker`] simulates the
//! full skeleton (CNOT, X, Y, Swap) over a growable variable basis —
//! Hadamards allocate fresh variables — and is what phase folding sweeps
//! with. [`analyze_linear_segment`] is the restricted, exact version for
//! maximal CNOT+rotation runs, producing the (parity, angle) terms and the
//! final linear output map the scheduler and resynthesizer consume.

use alsvid_gf2::{AffineParity, Gf2Matrix, Octant, ParityVec};
use alsvid_ir::{Gate, Instruction};
use rustc_hash::FxHashMap;

/// Per-wire affine parity state under forward symbolic simulation.
pub struct ParityTracker {
    states: Vec<AffineParity>,
    next_var: usize,
}

impl ParityTracker {
    /// Start tracking `n` wires; wire `i` initially carries variable `i`.
    pub fn new(n: usize) -> Self {
        Self {
            states: (0..n).map(AffineParity::unit).collect(),
            next_var: n,
        }
    }

    /// The affine parity currently carried by `wire`.
    pub fn state(&self, wire: usize) -> &AffineParity {
        &self.states[wire]
    }

    /// Advance the tracker over one instruction.
    ///
    /// Linear gates update parities in place; `H` discards the wire's
    /// parity for a fresh variable (its output is not a parity of the
    /// inputs). Phase gates leave the state untouched — the caller reads
    /// [`ParityTracker::state`] at the site instead.
    pub fn apply(&mut self, inst: &Instruction) {
        match inst.gate {
            Gate::Cnot => {
                let control = self.states[inst.control().index()].clone();
                self.states[inst.target().index()] ^= &control;
            }
            Gate::X => self.states[inst.qubits[0].index()].negate(),
            Gate::Y => self.states[inst.qubits[0].index()].negate(),
            Gate::Swap => {
                let (a, b) = (inst.qubits[0].index(), inst.qubits[1].index());
                self.states.swap(a, b);
            }
            Gate::H => {
                let wire = inst.qubits[0].index();
                self.states[wire] = AffineParity::unit(self.next_var);
                self.next_var += 1;
            }
            Gate::Phase(_) => {}
        }
    }
}

/// One entry of an extracted phase polynomial: `angle` accumulated on
/// `parity`, first seen at gate index `first_site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTerm {
    /// The parity vector the rotation applies to.
    pub parity: ParityVec,
    /// Total accumulated rotation.
    pub angle: Octant,
    /// Index of the first gate that contributed to this term.
    pub first_site: usize,
}

/// Phase polynomial and final linear map of a CNOT+rotation segment.
pub struct SegmentPhases {
    /// Merged phase terms, ordered by first occurrence. Zero-angle terms
    /// (full cancellations) are dropped.
    pub terms: Vec<PhaseTerm>,
    /// Row `w` = parity carried by wire `w` at segment exit, over the
    /// segment-entry wire basis.
    pub output: Gf2Matrix,
}

/// Extract the phase polynomial of a segment containing only CNOT and
/// phase gates, relative to the segment-entry wire basis.
pub fn analyze_linear_segment(n: usize, gates: &[Instruction]) -> SegmentPhases {
    let mut state = Gf2Matrix::identity(n);
    let mut index: FxHashMap<ParityVec, usize> = FxHashMap::default();
    let mut terms: Vec<PhaseTerm> = Vec::new();

    for (site, inst) in gates.iter().enumerate() {
        match inst.gate {
            Gate::Cnot => state.row_add(inst.control().index(), inst.target().index()),
            Gate::Phase(angle) => {
                let parity = state.row(inst.qubits[0].index()).clone();
                match index.get(&parity) {
                    Some(&i) => terms[i].angle += angle,
                    None => {
                        index.insert(parity.clone(), terms.len());
                        terms.push(PhaseTerm {
                            parity,
                            angle,
                            first_site: site,
                        });
                    }
                }
            }
            _ => unreachable!("non-linear gate inside a linear segment"),
        }
    }

    terms.retain(|t| !t.angle.is_zero());
    SegmentPhases {
        terms,
        output: state,
    }
}

/// A maximal run of gates, classified by whether the run is a pure
/// CNOT+rotation (linear-with-phases) region or anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Only CNOT and phase gates; the scheduler and resynthesizer rewrite
    /// these freely.
    Linear(&'a [Instruction]),
    /// Everything else; replayed untouched.
    Opaque(&'a [Instruction]),
}

fn is_linear(inst: &Instruction) -> bool {
    matches!(inst.gate, Gate::Cnot | Gate::Phase(_))
}

/// Split a gate sequence into maximal linear/opaque segments.
pub fn segments(gates: &[Instruction]) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < gates.len() {
        let linear = is_linear(&gates[start]);
        let mut end = start + 1;
        while end < gates.len() && is_linear(&gates[end]) == linear {
            end += 1;
        }
        let slice = &gates[start..end];
        out.push(if linear {
            Segment::Linear(slice)
        } else {
            Segment::Opaque(slice)
        });
        start = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_tracker_cnot_and_x() {
        let mut tracker = ParityTracker::new(2);
        tracker.apply(&Instruction::cnot(QubitId(0), QubitId(1)));
        // wire 1 carries x0 ⊕ x1
        assert_eq!(
            tracker.state(1).linear.ones().collect::<Vec<_>>(),
            vec![0, 1]
        );
        tracker.apply(&Instruction::x(QubitId(1)));
        assert!(tracker.state(1).complement);
    }

    #[test]
    fn test_tracker_hadamard_fresh_variable() {
        let mut tracker = ParityTracker::new(2);
        tracker.apply(&Instruction::h(QubitId(0)));
        assert!(tracker.state(0).is_unit(2));
        tracker.apply(&Instruction::h(QubitId(0)));
        assert!(tracker.state(0).is_unit(3));
    }

    #[test]
    fn test_segment_split() {
        let gates = vec![
            Instruction::cnot(QubitId(0), QubitId(1)),
            Instruction::t(QubitId(1)),
            Instruction::h(QubitId(0)),
            Instruction::t(QubitId(0)),
        ];
        let segs = segments(&gates);
        assert_eq!(segs.len(), 3);
        assert!(matches!(segs[0], Segment::Linear(s) if s.len() == 2));
        assert!(matches!(segs[1], Segment::Opaque(s) if s.len() == 1));
        assert!(matches!(segs[2], Segment::Linear(s) if s.len() == 1));
    }

    #[test]
    fn test_analyze_merges_recurring_parity() {
        // CNOT(0,1) T(1) CNOT(0,1) T(1): the second T sees parity x1 again
        // only after the CNOT undoes itself — here both Ts land on x0⊕x1
        // and x1 respectively.
        let gates = vec![
            Instruction::cnot(QubitId(0), QubitId(1)),
            Instruction::t(QubitId(1)),
            Instruction::cnot(QubitId(0), QubitId(1)),
            Instruction::t(QubitId(1)),
        ];
        let phases = analyze_linear_segment(2, &gates);
        assert_eq!(phases.terms.len(), 2);
        assert!(phases.output.is_identity());

        // Same parity twice merges into one term.
        let gates = vec![
            Instruction::t(QubitId(1)),
            Instruction::cnot(QubitId(0), QubitId(1)),
            Instruction::cnot(QubitId(0), QubitId(1)),
            Instruction::t(QubitId(1)),
        ];
        let phases = analyze_linear_segment(2, &gates);
        assert_eq!(phases.terms.len(), 1);
        assert_eq!(phases.terms[0].angle, Octant::S);
        assert_eq!(phases.terms[0].first_site, 0);
    }

    #[test]
    fn test_analyze_drops_cancelled_terms() {
        let gates = vec![
            Instruction::t(QubitId(0)),
            Instruction::phase(Octant::TDG, QubitId(0)),
        ];
        let phases = analyze_linear_segment(1, &gates);
        assert!(phases.terms.is_empty());
    }
}
