//! GF(2) parity vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// An element of the GF(2) vector space spanned by tracked variables:
/// "this wire currently carries the XOR of this variable subset".
///
/// Stored as a packed bitset. Invariant: no trailing zero words, so that
/// derived `Eq`/`Hash` agree with mathematical equality regardless of how
/// wide the vector was when built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParityVec {
    words: Vec<u64>,
}

impl ParityVec {
    /// The zero vector.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The unit vector for variable `index`.
    pub fn unit(index: usize) -> Self {
        let mut v = Self::zero();
        v.toggle(index);
        v
    }

    /// Whether variable `index` is in the parity.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|w| w & (1 << (index % 64)) != 0)
    }

    /// Flip variable `index`.
    pub fn toggle(&mut self, index: usize) {
        let word = index / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] ^= 1 << (index % 64);
        self.trim();
    }

    /// True for the zero vector.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of variables in the parity (Hamming weight).
    pub fn weight(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of the variables in the parity, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..64)
                .filter(move |b| word & (1 << b) != 0)
                .map(move |b| i * 64 + b)
        })
    }

    /// True if this is exactly the unit vector for variable `index`.
    pub fn is_unit(&self, index: usize) -> bool {
        self.get(index) && self.weight() == 1
    }

    /// The highest variable index in the parity, if any.
    pub fn leading(&self) -> Option<usize> {
        let word = self.words.last()?;
        Some((self.words.len() - 1) * 64 + (63 - word.leading_zeros() as usize))
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl BitXorAssign<&ParityVec> for ParityVec {
    fn bitxor_assign(&mut self, rhs: &ParityVec) {
        if rhs.words.len() > self.words.len() {
            self.words.resize(rhs.words.len(), 0);
        }
        for (w, r) in self.words.iter_mut().zip(&rhs.words) {
            *w ^= r;
        }
        self.trim();
    }
}

impl BitXor<&ParityVec> for &ParityVec {
    type Output = ParityVec;

    fn bitxor(self, rhs: &ParityVec) -> ParityVec {
        let mut out = self.clone();
        out ^= rhs;
        out
    }
}

impl FromIterator<usize> for ParityVec {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut v = Self::zero();
        for index in iter {
            v.toggle(index);
        }
        v
    }
}

impl fmt::Display for ParityVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for index in self.ones() {
            if !first {
                write!(f, "⊕")?;
            }
            write!(f, "x{index}")?;
            first = false;
        }
        Ok(())
    }
}

/// A parity vector plus a complement bit: `1 ⊕ p` when `complement` is set.
///
/// Forward simulation of the CNOT/X skeleton stays in this affine space:
/// CNOT XOR-combines two affine parities, X flips the complement bit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffineParity {
    /// The linear part.
    pub linear: ParityVec,
    /// Whether the carried value is complemented.
    pub complement: bool,
}

impl AffineParity {
    /// The affine parity carrying exactly variable `index`.
    pub fn unit(index: usize) -> Self {
        Self {
            linear: ParityVec::unit(index),
            complement: false,
        }
    }

    /// The constant-zero parity.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Flip the carried value (the effect of an X gate).
    pub fn negate(&mut self) {
        self.complement = !self.complement;
    }

    /// True if this is exactly variable `index`, uncomplemented.
    pub fn is_unit(&self, index: usize) -> bool {
        !self.complement && self.linear.weight() == 1 && self.linear.get(index)
    }
}

impl BitXorAssign<&AffineParity> for AffineParity {
    fn bitxor_assign(&mut self, rhs: &AffineParity) {
        self.linear ^= &rhs.linear;
        self.complement ^= rhs.complement;
    }
}

impl fmt::Display for AffineParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complement {
            if self.linear.is_zero() {
                return write!(f, "1");
            }
            write!(f, "1⊕")?;
        }
        write!(f, "{}", self.linear)
    }
}
