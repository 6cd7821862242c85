//! Rotation accumulator in units of π/4, modulo 8.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A Z-axis rotation angle measured in quarter turns of the Bloch sphere
/// equator: `Octant(m)` is the rotation by `m`·π/4, with `m` taken mod 8.
///
/// Angles form an additive group; merging two rotations on the same parity
/// is plain addition. The even values are Clifford phases (I, S, Z, S†),
/// the odd values are the non-Clifford eighth turns (T-like).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Octant(u8);

impl Octant {
    /// The zero rotation.
    pub const ZERO: Octant = Octant(0);
    /// T gate angle (π/4).
    pub const T: Octant = Octant(1);
    /// S gate angle (π/2).
    pub const S: Octant = Octant(2);
    /// Z gate angle (π).
    pub const Z: Octant = Octant(4);
    /// S-dagger gate angle.
    pub const SDG: Octant = Octant(6);
    /// T-dagger gate angle.
    pub const TDG: Octant = Octant(7);

    /// Create an octant from any integer multiple of π/4.
    pub fn new(m: i64) -> Self {
        Octant(m.rem_euclid(8) as u8)
    }

    /// The multiple of π/4 in `0..8`.
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// True for the zero rotation.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True for Clifford phases (even multiples of π/4).
    #[inline]
    pub fn is_clifford(self) -> bool {
        self.0 % 2 == 0
    }

    /// True for the non-Clifford eighth turns (odd multiples of π/4).
    #[inline]
    pub fn is_proper_rotation(self) -> bool {
        self.0 % 2 == 1
    }
}

impl Add for Octant {
    type Output = Octant;

    fn add(self, rhs: Octant) -> Octant {
        Octant((self.0 + rhs.0) % 8)
    }
}

impl AddAssign for Octant {
    fn add_assign(&mut self, rhs: Octant) {
        *self = *self + rhs;
    }
}

impl Sub for Octant {
    type Output = Octant;

    fn sub(self, rhs: Octant) -> Octant {
        self + (-rhs)
    }
}

impl Neg for Octant {
    type Output = Octant;

    fn neg(self) -> Octant {
        Octant((8 - self.0) % 8)
    }
}

impl Mul<Octant> for i64 {
    type Output = Octant;

    fn mul(self, rhs: Octant) -> Octant {
        Octant::new(self * i64::from(rhs.0))
    }
}

impl Mul for Octant {
    type Output = Octant;

    fn mul(self, rhs: Octant) -> Octant {
        Octant((self.0 * rhs.0) % 8)
    }
}

impl Sum for Octant {
    fn sum<I: Iterator<Item = Octant>>(iter: I) -> Octant {
        iter.fold(Octant::ZERO, Add::add)
    }
}

impl From<u8> for Octant {
    fn from(m: u8) -> Self {
        Octant(m % 8)
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "0"),
            1 => write!(f, "π/4"),
            2 => write!(f, "π/2"),
            4 => write!(f, "π"),
            m => write!(f, "{m}π/4"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition_wraps() {
        assert_eq!(Octant::T + Octant::TDG, Octant::ZERO);
        assert_eq!(Octant::S + Octant::S, Octant::Z);
        assert_eq!(Octant::new(7) + Octant::new(3), Octant::S);
    }

    #[test]
    fn test_negation() {
        assert_eq!(-Octant::ZERO, Octant::ZERO);
        assert_eq!(-Octant::T, Octant::TDG);
        assert_eq!(-Octant::Z, Octant::Z);
    }

    #[test]
    fn test_new_from_negative() {
        assert_eq!(Octant::new(-1), Octant::TDG);
        assert_eq!(Octant::new(-8), Octant::ZERO);
        assert_eq!(Octant::new(17), Octant::T);
    }

    #[test]
    fn test_clifford_classification() {
        assert!(Octant::ZERO.is_clifford());
        assert!(Octant::S.is_clifford());
        assert!(Octant::Z.is_clifford());
        assert!(!Octant::T.is_clifford());
        assert!(Octant::TDG.is_proper_rotation());
    }

    #[test]
    fn test_scalar_multiple() {
        assert_eq!(-2 * Octant::T, Octant::SDG);
        assert_eq!(4 * Octant::S, Octant::ZERO);
    }
}
