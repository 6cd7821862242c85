//! The path-sum rewrite system and equivalence verdicts.

use std::collections::BTreeSet;
use std::fmt;

use alsvid_gf2::{AffineParity, Octant, ParityVec};
use alsvid_ir::Circuit;
use serde::Serialize;
use tracing::debug;

use crate::error::VerifyResult;
use crate::pathsum::PathSum;

/// Outcome of an equivalence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// The miter reduced to the identity path-sum: the circuits agree up
    /// to global phase.
    Equivalent,
    /// Every path variable was resolved and a discrepancy remains — a
    /// concrete difference in amplitudes, reported symbolically.
    NotEquivalent(Witness),
    /// The rewrite system stalled with path variables outstanding. The
    /// check is sound: this is never reported as equivalence.
    Inconclusive(Witness),
}

impl Verdict {
    /// True for [`Verdict::Equivalent`].
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Verdict::Equivalent)
    }
}

/// Symbolic description of a non-identity residual: what is left of the
/// miter after exhaustive reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Witness {
    /// Path variables the rewrite system could not resolve.
    pub stuck_path_vars: Vec<usize>,
    /// Residual non-constant phase terms, rendered.
    pub phase_terms: Vec<String>,
    /// Wires whose final parity differs from the identity, rendered.
    pub output_mismatches: Vec<String>,
    /// Residual √2 normalization exponent.
    pub sqrt2: i32,
}

impl Witness {
    fn of(circuit: &Circuit, sum: &PathSum, stuck: &BTreeSet<usize>) -> Self {
        let phase_terms = sum
            .phase()
            .sorted_terms()
            .into_iter()
            .map(|(mono, coeff)| format!("{}·{mono}", coeff.value()))
            .collect();
        let identity = PathSum::identity(circuit);
        let output_mismatches = sum
            .outputs()
            .iter()
            .zip(identity.outputs())
            .enumerate()
            .filter(|(_, (actual, expected))| actual != expected)
            .map(|(w, (actual, expected))| {
                format!(
                    "wire {} carries {actual}, expected {expected}",
                    circuit.qubits()[w].name
                )
            })
            .collect();
        Witness {
            stuck_path_vars: stuck.iter().copied().collect(),
            phase_terms,
            output_mismatches,
            sqrt2: sum.sqrt2(),
        }
    }

    /// True when nothing at all distinguishes the residual from identity.
    pub fn is_trivial(&self) -> bool {
        self.stuck_path_vars.is_empty()
            && self.phase_terms.is_empty()
            && self.output_mismatches.is_empty()
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.stuck_path_vars.is_empty() {
            writeln!(f, "unresolved path variables: {:?}", self.stuck_path_vars)?;
        }
        for term in &self.phase_terms {
            writeln!(f, "residual phase term: {term}")?;
        }
        for mismatch in &self.output_mismatches {
            writeln!(f, "{mismatch}")?;
        }
        Ok(())
    }
}

/// Check whether `candidate` implements the same unitary as `original`,
/// up to global phase.
///
/// Builds the miter path-sum (original followed by the candidate's
/// structural inverse) and reduces it exhaustively with the elimination,
/// matching, and omega rules. Reduction to the identity certifies
/// equivalence; a fully-resolved residual certifies non-equivalence; a
/// stalled residual is reported as inconclusive. Within the CNOT-dyadic
/// fragment the procedure is a decision procedure; outside it, it degrades
/// to "inconclusive", never to a wrong verdict.
pub fn check_equivalence(original: &Circuit, candidate: &Circuit) -> VerifyResult<Verdict> {
    let mut miter = PathSum::miter(original, candidate)?;
    let stuck = reduce(&mut miter);
    debug!(
        "miter reduced: {} stuck vars, {} phase terms",
        stuck.len(),
        miter.phase().sorted_terms().len()
    );

    if stuck.is_empty() {
        let identity = PathSum::identity(original);
        let outputs_match = miter.outputs() == identity.outputs();
        if outputs_match && miter.phase().is_constant() {
            return Ok(Verdict::Equivalent);
        }
        return Ok(Verdict::NotEquivalent(Witness::of(
            original, &miter, &stuck,
        )));
    }
    Ok(Verdict::Inconclusive(Witness::of(original, &miter, &stuck)))
}

/// Apply the rewrite rules to a fixed point; returns the surviving path
/// variables.
pub fn reduce(sum: &mut PathSum) -> BTreeSet<usize> {
    let mut active: BTreeSet<usize> = sum.path_vars().collect();
    loop {
        let mut progressed = false;
        for y in active.clone() {
            if !active.contains(&y) {
                continue;
            }
            if try_elim(sum, y) {
                active.remove(&y);
                progressed = true;
            } else if let Some(partner) = try_match(sum, y, &active) {
                active.remove(&y);
                active.remove(&partner);
                progressed = true;
            } else if try_omega(sum, y) {
                active.remove(&y);
                progressed = true;
            }
        }
        if !progressed {
            return active;
        }
    }
}

/// Elimination: a variable absent from the outputs and the phase sums to
/// a constant factor of 2.
fn try_elim(sum: &mut PathSum, y: usize) -> bool {
    if sum.var_in_outputs(y) || sum.phase().mentions(y) {
        return false;
    }
    sum.add_sqrt2(2);
    true
}

/// Matching: if `y` occurs only as `4·y·(y' ⊕ f)` with `y'` another live
/// path variable, the sum over `y` forces `y' = f`; substitute and drop
/// both. Returns the partner that was substituted away.
fn try_match(sum: &mut PathSum, y: usize, active: &BTreeSet<usize>) -> Option<usize> {
    if sum.var_in_outputs(y) {
        return None;
    }
    let terms = sum.phase().terms_with(y);
    if terms.is_empty() {
        return None;
    }
    let mut linear = ParityVec::zero();
    let mut complement = false;
    for (mono, coeff) in &terms {
        if *coeff != Octant::Z || mono.degree() > 2 {
            return None;
        }
        match mono.degree() {
            1 => complement = !complement,
            _ => {
                let v = mono.vars().iter().copied().find(|&v| v != y)?;
                linear.toggle(v);
            }
        }
    }
    // The freshest live path variable in the form becomes the matched one.
    let partner = linear
        .ones()
        .filter(|v| active.contains(v) && *v != y)
        .max()?;
    linear.toggle(partner);
    let f = AffineParity { linear, complement };

    sum.phase_mut().drop_var(y);
    sum.phase_mut().substitute(partner, &f);
    for output in sum.outputs_mut() {
        if output.linear.get(partner) {
            output.linear.toggle(partner);
            output.linear ^= &f.linear;
            output.complement ^= f.complement;
        }
    }
    sum.add_sqrt2(2);
    Some(partner)
}

/// Omega: `y` occurring as `±2·y + 4·y·f` sums to a √2·ω^±1 factor times
/// a residual linear phase in `f`; fold that back in and drop `y`.
fn try_omega(sum: &mut PathSum, y: usize) -> bool {
    if sum.var_in_outputs(y) {
        return false;
    }
    let terms = sum.phase().terms_with(y);
    let mut linear_coeff: Option<Octant> = None;
    let mut f_linear = ParityVec::zero();
    for (mono, coeff) in &terms {
        match mono.degree() {
            1 => {
                if linear_coeff.is_some() {
                    return false;
                }
                linear_coeff = Some(*coeff);
            }
            2 if *coeff == Octant::Z => {
                if let Some(&v) = mono.vars().iter().find(|&&v| v != y) {
                    f_linear.toggle(v);
                }
            }
            _ => return false,
        }
    }
    let sign = match linear_coeff {
        Some(c) if c == Octant::S => 1,
        Some(c) if c == Octant::SDG => -1,
        _ => return false,
    };

    sum.phase_mut().drop_var(y);
    sum.add_sqrt2(1);
    sum.phase_mut().add_constant(Octant::new(sign));
    let f = AffineParity {
        linear: f_linear,
        complement: false,
    };
    sum.phase_mut().add_lifted(&f, Octant::new(-2 * sign));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_identity_miter_is_equivalent() {
        let mut c = Circuit::with_wires("c", 2);
        c.cnot(QubitId(0), QubitId(1)).unwrap().t(QubitId(1)).unwrap();
        let verdict = check_equivalence(&c, &c).unwrap();
        assert!(verdict.is_equivalent());
    }

    #[test]
    fn test_hadamard_pair_reduces() {
        let mut a = Circuit::with_wires("a", 1);
        a.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
        let b = Circuit::with_wires("b", 1);
        assert!(check_equivalence(&a, &b).unwrap().is_equivalent());
    }

    #[test]
    fn test_clifford_interleaving_needs_omega() {
        // H S H on both sides: reduction has to fire the omega rule to
        // clear the middle variable.
        let mut a = Circuit::with_wires("a", 1);
        a.h(QubitId(0)).unwrap().s(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
        assert!(check_equivalence(&a, &a).unwrap().is_equivalent());
    }

    #[test]
    fn test_mutated_rotation_reported() {
        let mut a = Circuit::with_wires("a", 2);
        a.cnot(QubitId(0), QubitId(1)).unwrap().t(QubitId(1)).unwrap();
        let mut b = Circuit::with_wires("b", 2);
        b.cnot(QubitId(0), QubitId(1)).unwrap().s(QubitId(1)).unwrap();
        match check_equivalence(&a, &b).unwrap() {
            Verdict::NotEquivalent(witness) => {
                assert!(!witness.is_trivial());
                assert!(!witness.phase_terms.is_empty());
            }
            other => panic!("expected NotEquivalent, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_skeleton_reported() {
        let mut a = Circuit::with_wires("a", 2);
        a.cnot(QubitId(0), QubitId(1)).unwrap();
        let b = Circuit::with_wires("b", 2);
        match check_equivalence(&a, &b).unwrap() {
            Verdict::NotEquivalent(witness) => {
                assert!(!witness.output_mismatches.is_empty());
            }
            other => panic!("expected NotEquivalent, got {other:?}"),
        }
    }

    #[test]
    fn test_global_phase_ignored() {
        // X T X T is ω·I; the empty circuit matches it up to global phase.
        let mut a = Circuit::with_wires("a", 1);
        a.x(QubitId(0))
            .unwrap()
            .t(QubitId(0))
            .unwrap()
            .x(QubitId(0))
            .unwrap()
            .t(QubitId(0))
            .unwrap();
        let b = Circuit::with_wires("b", 1);
        assert!(check_equivalence(&a, &b).unwrap().is_equivalent());
    }

    #[test]
    fn test_sqrt2_balances_on_equivalence() {
        let mut a = Circuit::with_wires("a", 1);
        a.h(QubitId(0)).unwrap().t(QubitId(0)).unwrap().h(QubitId(0)).unwrap();
        let mut miter = PathSum::miter(&a, &a).unwrap();
        let stuck = reduce(&mut miter);
        assert!(stuck.is_empty());
        assert_eq!(miter.sqrt2(), 0);
    }

    #[test]
    fn test_swap_is_wire_relabeling() {
        let mut a = Circuit::with_wires("a", 2);
        a.swap(QubitId(0), QubitId(1)).unwrap();
        let mut b = Circuit::with_wires("b", 2);
        b.cnot(QubitId(0), QubitId(1))
            .unwrap()
            .cnot(QubitId(1), QubitId(0))
            .unwrap()
            .cnot(QubitId(0), QubitId(1))
            .unwrap();
        assert!(check_equivalence(&a, &b).unwrap().is_equivalent());
    }
}
