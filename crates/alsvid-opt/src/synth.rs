//! GF(2) network synthesis primitives.
//!
//! A CNOT with control `c` and target `t` acts on the wire-state matrix as
//! the row addition `row[t] ^= row[c]`. Synthesis is therefore elementary
//! row-operation factorization: every routine here returns `(control,
//! target)` pairs whose row actions, applied in order, take one wire state
//! to another. Pivots and targets are chosen by ascending wire index, so
//! the emitted networks are reproducible.

use alsvid_gf2::{Gf2Matrix, ParityVec};

use crate::error::{OptError, OptResult};

/// CNOT sequence taking wire state `from` to wire state `to`.
///
/// Both must be invertible over the same basis; the result applied
/// left-to-right satisfies `apply(ops, from) == to`.
pub fn synth_transform(
    pass: &'static str,
    from: &Gf2Matrix,
    to: &Gf2Matrix,
) -> OptResult<Vec<(usize, usize)>> {
    let inv = from.inverse().ok_or_else(|| OptError::Synthesis {
        pass,
        detail: "wire state is singular".into(),
    })?;
    let transform = to.mul(&inv);
    let mut ops = transform
        .elimination_ops()
        .ok_or_else(|| OptError::Synthesis {
            pass,
            detail: "required transform is singular".into(),
        })?;
    // elimination_ops reduces the transform to I; the transform itself is
    // the same additions composed in the opposite order.
    ops.reverse();
    Ok(ops)
}

/// Make `parity` appear on some wire of `state` with the fewest row
/// additions: the solving wire subset is folded onto its lowest-index
/// member. Returns the CNOTs emitted and the wire now carrying `parity`.
pub fn realize_parity(
    pass: &'static str,
    state: &mut Gf2Matrix,
    parity: &ParityVec,
) -> OptResult<(Vec<(usize, usize)>, usize)> {
    let combo = state.solve_rows(parity).ok_or_else(|| OptError::Synthesis {
        pass,
        detail: format!("parity {parity} is outside the wire-state row space"),
    })?;
    let wires: Vec<usize> = combo.ones().collect();
    debug_assert!(!wires.is_empty(), "nonzero parity has a nonempty solution");
    let target = wires[0];
    let mut ops = Vec::with_capacity(wires.len().saturating_sub(1));
    for &control in &wires[1..] {
        state.row_add(control, target);
        ops.push((control, target));
    }
    Ok((ops, target))
}

/// Extend an independent set of parities to a full basis, preferring rows
/// of the current wire state (in ascending wire order) so the completing
/// transform stays close to what the wires already carry.
pub fn complete_basis(layer: &[ParityVec], current: &Gf2Matrix) -> Gf2Matrix {
    let n = current.num_rows();
    let mut rows: Vec<ParityVec> = layer.to_vec();
    let mut echelon: Vec<ParityVec> = Vec::new();
    for row in &rows {
        insert_echelon(&mut echelon, row.clone());
    }
    for wire in 0..n {
        if rows.len() == n {
            break;
        }
        if insert_echelon(&mut echelon, current.row(wire).clone()) {
            rows.push(current.row(wire).clone());
        }
    }
    debug_assert_eq!(rows.len(), n, "invertible state always completes a basis");
    Gf2Matrix::from_rows(rows, n)
}

/// Reduce `row` against the echelon set and insert it if independent.
/// Returns whether the row was independent.
pub fn insert_echelon(echelon: &mut Vec<ParityVec>, mut row: ParityVec) -> bool {
    for er in echelon.iter() {
        if er.leading().is_some_and(|l| row.get(l)) {
            row ^= er;
        }
    }
    if row.is_zero() {
        return false;
    }
    echelon.push(row);
    echelon.sort_by_key(|r| std::cmp::Reverse(r.leading()));
    true
}

/// Apply a CNOT list to a wire-state matrix (test helper and invariant
/// check for callers).
pub fn apply_ops(state: &mut Gf2Matrix, ops: &[(usize, usize)]) {
    for &(control, target) in ops {
        state.row_add(control, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_bits(rows: &[&[usize]], width: usize) -> Gf2Matrix {
        Gf2Matrix::from_rows(
            rows.iter().map(|r| r.iter().copied().collect()).collect(),
            width,
        )
    }

    #[test]
    fn test_synth_transform_round_trip() {
        let from = Gf2Matrix::identity(3);
        let to = from_bits(&[&[0, 1], &[1], &[1, 2]], 3);
        let ops = synth_transform("test", &from, &to).unwrap();
        let mut state = from.clone();
        apply_ops(&mut state, &ops);
        assert_eq!(state, to);
    }

    #[test]
    fn test_synth_transform_identity_is_empty() {
        let state = from_bits(&[&[0, 2], &[1], &[2]], 3);
        let ops = synth_transform("test", &state, &state).unwrap();
        assert!(ops.is_empty());
    }

    #[test]
    fn test_realize_parity_lowest_wire_target() {
        let mut state = Gf2Matrix::identity(3);
        let parity = ParityVec::from_iter([0, 2]);
        let (ops, wire) = realize_parity("test", &mut state, &parity).unwrap();
        assert_eq!(wire, 0);
        assert_eq!(ops, vec![(2, 0)]);
        assert_eq!(state.row(0), &parity);
    }

    #[test]
    fn test_realize_parity_already_present() {
        let mut state = from_bits(&[&[0, 1], &[1], &[2]], 3);
        let parity = ParityVec::from_iter([0, 1]);
        let (ops, wire) = realize_parity("test", &mut state, &parity).unwrap();
        assert!(ops.is_empty());
        assert_eq!(wire, 0);
    }

    #[test]
    fn test_complete_basis() {
        let state = Gf2Matrix::identity(3);
        let layer = vec![ParityVec::from_iter([0, 1])];
        let basis = complete_basis(&layer, &state);
        assert_eq!(basis.rank(), 3);
        assert_eq!(basis.row(0), &ParityVec::from_iter([0, 1]));
    }
}
