//! Multilinear phase polynomials with Z/8 coefficients.
//!
//! A path-sum's phase is `ω^P` with `ω = e^{iπ/4}` and `P` a multilinear
//! polynomial over {0,1}-valued variables. Rotations contribute the
//! arithmetic lift of their GF(2) parity: XOR lifts by
//! `a ⊕ b = a + b − 2ab`, and because coefficients live mod 8 the lift
//! truncates itself — a parity of any width expands to monomials of
//! degree at most three before every higher coefficient hits 0 mod 8.

use alsvid_gf2::{AffineParity, Octant};
use rustc_hash::FxHashMap;
use std::fmt;

/// A product of distinct variables (a set), kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial {
    vars: Vec<usize>,
}

impl Monomial {
    /// The monomial over one variable.
    pub fn var(v: usize) -> Self {
        Self { vars: vec![v] }
    }

    /// Build from a set of variables (deduplicated, sorted).
    pub fn from_vars(mut vars: Vec<usize>) -> Self {
        vars.sort_unstable();
        vars.dedup();
        Self { vars }
    }

    /// The variables of the monomial, ascending.
    pub fn vars(&self) -> &[usize] {
        &self.vars
    }

    /// Monomial degree.
    pub fn degree(&self) -> usize {
        self.vars.len()
    }

    /// Whether the monomial contains `v`.
    pub fn contains(&self, v: usize) -> bool {
        self.vars.binary_search(&v).is_ok()
    }

    /// The product with another variable set (idempotent: x·x = x).
    pub fn times(&self, other: &Monomial) -> Monomial {
        let mut vars = self.vars.clone();
        vars.extend_from_slice(&other.vars);
        Monomial::from_vars(vars)
    }

    /// The monomial with `v` removed.
    pub fn without(&self, v: usize) -> Monomial {
        Monomial {
            vars: self.vars.iter().copied().filter(|&x| x != v).collect(),
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.vars {
            if !first {
                write!(f, "·")?;
            }
            write!(f, "v{v}")?;
            first = false;
        }
        Ok(())
    }
}

/// A phase polynomial: monomial → Z/8 coefficient, plus a constant term
/// (the global phase, which equivalence checking ignores).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhasePoly {
    terms: FxHashMap<Monomial, Octant>,
    constant: Octant,
}

impl PhasePoly {
    /// The zero polynomial.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff · mono`; an empty monomial routes to the constant.
    pub fn add_term(&mut self, mono: Monomial, coeff: Octant) {
        if coeff.is_zero() {
            return;
        }
        if mono.degree() == 0 {
            self.constant += coeff;
            return;
        }
        match self.terms.entry(mono) {
            std::collections::hash_map::Entry::Occupied(mut e) => {
                let sum = *e.get() + coeff;
                if sum.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(coeff);
            }
        }
    }

    /// Add a constant (global) phase.
    pub fn add_constant(&mut self, coeff: Octant) {
        self.constant += coeff;
    }

    /// Add `coeff` times the arithmetic lift of an affine parity.
    pub fn add_lifted(&mut self, parity: &AffineParity, coeff: Octant) {
        for (mono, c) in lift(parity) {
            self.add_term(mono, c * coeff);
        }
    }

    /// Add the Hadamard coupling `4 · f · y` for fresh path variable `y`.
    ///
    /// The coefficient 4 kills every lifted term of degree ≥ 2 mod 8, so
    /// only the linear part of `f` (and its complement bit) survives.
    pub fn add_hadamard_coupling(&mut self, f: &AffineParity, y: usize) {
        for v in f.linear.ones() {
            self.add_term(Monomial::from_vars(vec![v, y]), Octant::Z);
        }
        if f.complement {
            self.add_term(Monomial::var(y), Octant::Z);
        }
    }

    /// Substitute `v := f` (an affine parity) throughout.
    pub fn substitute(&mut self, v: usize, f: &AffineParity) {
        let affected: Vec<(Monomial, Octant)> = self
            .terms
            .iter()
            .filter(|(m, _)| m.contains(v))
            .map(|(m, c)| (m.clone(), *c))
            .collect();
        let lifted = lift(f);
        for (mono, coeff) in affected {
            self.terms.remove(&mono);
            let rest = mono.without(v);
            for (lm, lc) in &lifted {
                self.add_term(rest.times(lm), *lc * coeff);
            }
        }
    }

    /// Remove every term containing `v` (used once a sum over `v` has been
    /// resolved by a rewrite rule).
    pub fn drop_var(&mut self, v: usize) {
        self.terms.retain(|m, _| !m.contains(v));
    }

    /// The terms containing `v`.
    pub fn terms_with(&self, v: usize) -> Vec<(&Monomial, Octant)> {
        self.terms
            .iter()
            .filter(|(m, _)| m.contains(v))
            .map(|(m, c)| (m, *c))
            .collect()
    }

    /// Whether `v` occurs in any term.
    pub fn mentions(&self, v: usize) -> bool {
        self.terms.keys().any(|m| m.contains(v))
    }

    /// Whether the polynomial has no non-constant terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// The constant (global-phase) term.
    pub fn constant(&self) -> Octant {
        self.constant
    }

    /// The non-constant terms, sorted for deterministic rendering.
    pub fn sorted_terms(&self) -> Vec<(Monomial, Octant)> {
        let mut out: Vec<_> = self.terms.iter().map(|(m, c)| (m.clone(), *c)).collect();
        out.sort();
        out
    }
}

/// The arithmetic lift of an affine parity over {0,1} variables, as
/// (monomial, coefficient) pairs with coefficients in Z/8.
fn lift(parity: &AffineParity) -> Vec<(Monomial, Octant)> {
    let mut poly: FxHashMap<Monomial, Octant> = FxHashMap::default();
    for v in parity.linear.ones() {
        // L := L + v − 2·L·v
        let mut delta: Vec<(Monomial, Octant)> = vec![(Monomial::var(v), Octant::new(1))];
        for (m, c) in &poly {
            delta.push((m.times(&Monomial::var(v)), -2 * *c));
        }
        for (m, c) in delta {
            let entry = poly.entry(m).or_default();
            *entry += c;
        }
        poly.retain(|_, c| !c.is_zero());
    }
    let mut out: Vec<(Monomial, Octant)> = Vec::with_capacity(poly.len() + 1);
    if parity.complement {
        // 1 − L
        out.push((Monomial::from_vars(vec![]), Octant::new(1)));
        out.extend(poly.into_iter().map(|(m, c)| (m, -c)));
    } else {
        out.extend(poly);
    }
    out
}

impl fmt::Display for PhasePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if !self.constant.is_zero() {
            write!(f, "{}", self.constant.value())?;
            first = false;
        }
        for (mono, coeff) in self.sorted_terms() {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}·{mono}", coeff.value())?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_gf2::ParityVec;

    fn affine(vars: &[usize], complement: bool) -> AffineParity {
        AffineParity {
            linear: vars.iter().copied().collect::<ParityVec>(),
            complement,
        }
    }

    fn coeff(poly: &PhasePoly, vars: &[usize]) -> u8 {
        poly.sorted_terms()
            .iter()
            .find(|(m, _)| m.vars() == vars)
            .map_or(0, |(_, c)| c.value())
    }

    #[test]
    fn test_lift_single_variable() {
        let mut p = PhasePoly::new();
        p.add_lifted(&affine(&[3], false), Octant::T);
        assert_eq!(coeff(&p, &[3]), 1);
        assert!(p.constant().is_zero());
    }

    #[test]
    fn test_lift_xor_pair() {
        // T on x0⊕x1 lifts to x0 + x1 − 2·x0x1.
        let mut p = PhasePoly::new();
        p.add_lifted(&affine(&[0, 1], false), Octant::T);
        assert_eq!(coeff(&p, &[0]), 1);
        assert_eq!(coeff(&p, &[1]), 1);
        assert_eq!(coeff(&p, &[0, 1]), 6);
    }

    #[test]
    fn test_lift_truncates_mod_8() {
        // Degree-4 coefficient is (−2)³ = −8 ≡ 0: no degree-4 monomial.
        let mut p = PhasePoly::new();
        p.add_lifted(&affine(&[0, 1, 2, 3], false), Octant::T);
        let max_degree = p
            .sorted_terms()
            .iter()
            .map(|(m, _)| m.degree())
            .max()
            .unwrap();
        assert_eq!(max_degree, 3);
        assert_eq!(coeff(&p, &[0, 1, 2]), 4);
    }

    #[test]
    fn test_lift_complement_negates() {
        // m on 1⊕x0 = m − m·x0: constant m plus −m on x0.
        let mut p = PhasePoly::new();
        p.add_lifted(&affine(&[0], true), Octant::T);
        assert_eq!(p.constant(), Octant::T);
        assert_eq!(coeff(&p, &[0]), 7);
    }

    #[test]
    fn test_opposite_lifts_cancel() {
        let mut p = PhasePoly::new();
        p.add_lifted(&affine(&[0, 2], false), Octant::S);
        p.add_lifted(&affine(&[0, 2], false), Octant::SDG);
        assert!(p.is_constant());
        assert!(p.constant().is_zero());
    }

    #[test]
    fn test_hadamard_coupling_linear_only() {
        let mut p = PhasePoly::new();
        p.add_hadamard_coupling(&affine(&[0, 1], true), 5);
        assert_eq!(coeff(&p, &[0, 5]), 4);
        assert_eq!(coeff(&p, &[1, 5]), 4);
        assert_eq!(coeff(&p, &[5]), 4);
        assert_eq!(coeff(&p, &[0, 1, 5]), 0);
    }

    #[test]
    fn test_substitute() {
        // 4·y·z with z := x0 becomes 4·y·x0.
        let mut p = PhasePoly::new();
        p.add_term(Monomial::from_vars(vec![4, 5]), Octant::Z);
        p.substitute(5, &affine(&[0], false));
        assert_eq!(coeff(&p, &[0, 4]), 4);
        assert!(!p.mentions(5));
    }

    #[test]
    fn test_substitute_constant() {
        // 4·y·z with z := 1 becomes 4·y.
        let mut p = PhasePoly::new();
        p.add_term(Monomial::from_vars(vec![4, 5]), Octant::Z);
        p.substitute(5, &affine(&[], true));
        assert_eq!(coeff(&p, &[4]), 4);
    }
}
