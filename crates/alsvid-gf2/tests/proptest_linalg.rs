//! Property-based tests for the GF(2) algebra laws the optimizer relies on.

use alsvid_gf2::{Gf2Matrix, Octant, ParityVec};
use proptest::prelude::*;

/// Generate a parity vector over up to 96 variables.
fn arb_parity() -> impl Strategy<Value = ParityVec> {
    prop::collection::vec(0_usize..96, 0..12).prop_map(ParityVec::from_iter)
}

/// Generate a square matrix as a product of elementary row additions, so it
/// is invertible by construction.
fn arb_invertible(n: usize) -> impl Strategy<Value = Gf2Matrix> {
    prop::collection::vec((0..n, 0..n), 0..24).prop_map(move |ops| {
        let mut m = Gf2Matrix::identity(n);
        for (src, dst) in ops {
            if src != dst {
                m.row_add(src, dst);
            }
        }
        m
    })
}

proptest! {
    #[test]
    fn xor_is_self_inverse(a in arb_parity()) {
        prop_assert!((&a ^ &a).is_zero());
    }

    #[test]
    fn xor_commutes(a in arb_parity(), b in arb_parity()) {
        prop_assert_eq!(&a ^ &b, &b ^ &a);
    }

    #[test]
    fn weight_of_disjoint_union_adds(a in arb_parity(), b in arb_parity()) {
        let c = &a ^ &b;
        // |a ⊕ b| = |a| + |b| − 2|a ∩ b|, so parity of weights adds.
        prop_assert_eq!(c.weight() % 2, (a.weight() + b.weight()) % 2);
    }

    #[test]
    fn octant_addition_mod_8(a in 0_i64..1000, b in -1000_i64..1000) {
        prop_assert_eq!(Octant::new(a) + Octant::new(b), Octant::new(a + b));
        prop_assert_eq!(Octant::new(a) + (-Octant::new(a)), Octant::ZERO);
    }

    #[test]
    fn inverse_round_trips(m in arb_invertible(6)) {
        let inv = m.inverse().expect("constructed invertible");
        prop_assert!(m.mul(&inv).is_identity());
        prop_assert!(inv.mul(&m).is_identity());
    }

    #[test]
    fn elimination_ops_reduce_to_identity(m in arb_invertible(6)) {
        let mut work = m.clone();
        for (src, dst) in m.elimination_ops().expect("invertible") {
            work.row_add(src, dst);
        }
        prop_assert!(work.is_identity());
    }

    #[test]
    fn solve_rows_reconstructs_target(m in arb_invertible(6), target in prop::collection::vec(0_usize..6, 0..6)) {
        let target = ParityVec::from_iter(target);
        // Invertible rows span the space, so every target is solvable.
        let combo = m.solve_rows(&target).expect("rows span the space");
        let mut acc = ParityVec::zero();
        for i in combo.ones() {
            acc ^= m.row(i);
        }
        prop_assert_eq!(acc, target);
    }
}
