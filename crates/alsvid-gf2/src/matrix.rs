//! Dense GF(2) matrices with exact elimination.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parity::ParityVec;

/// A GF(2) matrix stored as packed rows.
///
/// Used for linear output maps (row `w` = parity carried by wire `w`) and
/// as the working state of network synthesis. All elimination routines pick
/// pivots by ascending index so results are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gf2Matrix {
    rows: Vec<ParityVec>,
    width: usize,
}

impl Gf2Matrix {
    /// The `n`×`n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            rows: (0..n).map(ParityVec::unit).collect(),
            width: n,
        }
    }

    /// Build a matrix from rows over `width` columns.
    pub fn from_rows(rows: Vec<ParityVec>, width: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.leading().is_none_or(|l| l < width)));
        Self { rows, width }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> &ParityVec {
        &self.rows[i]
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[ParityVec] {
        &self.rows
    }

    /// Add row `src` into row `dst` (the row action of CNOT src→dst).
    pub fn row_add(&mut self, src: usize, dst: usize) {
        debug_assert_ne!(src, dst);
        let (a, b) = (self.rows[src].clone(), &mut self.rows[dst]);
        *b ^= &a;
    }

    /// True iff this is the square identity.
    pub fn is_identity(&self) -> bool {
        self.rows.len() == self.width
            && self.rows.iter().enumerate().all(|(i, r)| r.is_unit(i))
    }

    /// Rank over GF(2).
    pub fn rank(&self) -> usize {
        let mut echelon: Vec<ParityVec> = Vec::new();
        for row in &self.rows {
            if let Some(reduced) = reduce_against(row.clone(), &echelon) {
                echelon.push(reduced);
                echelon.sort_by_key(|r| std::cmp::Reverse(r.leading()));
            }
        }
        echelon.len()
    }

    /// The inverse, or `None` if singular. Square matrices only.
    pub fn inverse(&self) -> Option<Gf2Matrix> {
        let n = self.rows.len();
        if n != self.width {
            return None;
        }
        let mut work = self.clone();
        let mut inv = Gf2Matrix::identity(n);
        for (src, dst) in work.elimination_ops_mut()? {
            inv.row_add(src, dst);
        }
        debug_assert!(work.is_identity());
        Some(inv)
    }

    /// Matrix product `self · rhs`.
    pub fn mul(&self, rhs: &Gf2Matrix) -> Gf2Matrix {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = ParityVec::zero();
                for j in row.ones() {
                    out ^= rhs.row(j);
                }
                out
            })
            .collect();
        Gf2Matrix::from_rows(rows, rhs.width)
    }

    /// Coefficients `c` with `Σ c_i · row_i = target`, or `None` if `target`
    /// is outside the row space.
    pub fn solve_rows(&self, target: &ParityVec) -> Option<ParityVec> {
        let mut echelon: Vec<(ParityVec, ParityVec)> = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let mut r = row.clone();
            let mut combo = ParityVec::unit(i);
            for (er, ec) in &echelon {
                if er.leading().is_some_and(|l| r.get(l)) {
                    r ^= er;
                    combo ^= ec;
                }
            }
            if !r.is_zero() {
                echelon.push((r, combo));
                echelon.sort_by_key(|(r, _)| std::cmp::Reverse(r.leading()));
            }
        }
        let mut t = target.clone();
        let mut combo = ParityVec::zero();
        for (er, ec) in &echelon {
            if er.leading().is_some_and(|l| t.get(l)) {
                t ^= er;
                combo ^= ec;
            }
        }
        t.is_zero().then_some(combo)
    }

    /// The row-addition sequence reducing this matrix to the identity:
    /// applying `rows[dst] ^= rows[src]` for each `(src, dst)` in order
    /// yields `I`. Returns `None` if the matrix is singular or not square.
    pub fn elimination_ops(&self) -> Option<Vec<(usize, usize)>> {
        self.clone().elimination_ops_mut()
    }

    fn elimination_ops_mut(&mut self) -> Option<Vec<(usize, usize)>> {
        let n = self.rows.len();
        if n != self.width {
            return None;
        }
        let mut ops = Vec::new();
        for col in 0..n {
            if !self.rows[col].get(col) {
                let pivot = (col + 1..n).find(|&r| self.rows[r].get(col))?;
                self.row_add(pivot, col);
                ops.push((pivot, col));
            }
            for r in 0..n {
                if r != col && self.rows[r].get(col) {
                    self.row_add(col, r);
                    ops.push((col, r));
                }
            }
        }
        Some(ops)
    }
}

/// Reduce `row` against an echelon basis; `None` if it is dependent.
fn reduce_against(mut row: ParityVec, echelon: &[ParityVec]) -> Option<ParityVec> {
    for er in echelon {
        if er.leading().is_some_and(|l| row.get(l)) {
            row ^= er;
        }
    }
    (!row.is_zero()).then_some(row)
}

impl fmt::Display for Gf2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for col in 0..self.width {
                write!(f, "{}", u8::from(row.get(col)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
