//! Primitive gate vocabulary.

use alsvid_gf2::Octant;
use serde::{Deserialize, Serialize};

/// The primitive gates the engine operates over.
///
/// The vocabulary is deliberately small: the two-wire controlled-NOT, the
/// Z-axis rotation by any multiple of π/4 (which subsumes Z, S, S†, T, T†),
/// and the remaining fixed single-wire Clifford generators. Everything the
/// optimizer and the verifier do is defined on exactly this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Z-axis rotation by a multiple of π/4.
    Phase(Octant),
    /// Two-wire controlled-NOT.
    Cnot,
    /// Two-wire swap.
    Swap,
}

impl Gate {
    /// Canonical gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Phase(m) => match m.value() {
                0 => "id",
                1 => "t",
                2 => "s",
                3 => "rz3",
                4 => "z",
                5 => "rz5",
                6 => "sdg",
                7 => "tdg",
                _ => unreachable!("octant out of range"),
            },
            Gate::Cnot => "cnot",
            Gate::Swap => "swap",
        }
    }

    /// Number of wires this gate touches.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::H | Gate::X | Gate::Y | Gate::Phase(_) => 1,
            Gate::Cnot | Gate::Swap => 2,
        }
    }

    /// The rotation angle, for phase gates.
    #[inline]
    pub fn phase_angle(&self) -> Option<Octant> {
        match self {
            Gate::Phase(m) => Some(*m),
            _ => None,
        }
    }

    /// True for the non-Clifford rotations (odd multiples of π/4).
    pub fn is_proper_rotation(&self) -> bool {
        matches!(self, Gate::Phase(m) if m.is_proper_rotation())
    }

    /// True if the gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        match self {
            Gate::H | Gate::X | Gate::Y | Gate::Cnot | Gate::Swap => true,
            Gate::Phase(m) => *m + *m == Octant::ZERO,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> Gate {
        match self {
            Gate::Phase(m) => Gate::Phase(-*m),
            g => *g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Gate::Phase(Octant::T).name(), "t");
        assert_eq!(Gate::Phase(Octant::SDG).name(), "sdg");
        assert_eq!(Gate::Phase(Octant::new(3)).name(), "rz3");
        assert_eq!(Gate::Cnot.name(), "cnot");
    }

    #[test]
    fn test_arity() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::Swap.num_qubits(), 2);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Gate::Phase(Octant::T).inverse(), Gate::Phase(Octant::TDG));
        assert_eq!(Gate::H.inverse(), Gate::H);
        assert!(Gate::Phase(Octant::Z).is_self_inverse());
        assert!(!Gate::Phase(Octant::S).is_self_inverse());
    }

    #[test]
    fn test_rotation_classification() {
        assert!(Gate::Phase(Octant::T).is_proper_rotation());
        assert!(!Gate::Phase(Octant::S).is_proper_rotation());
        assert!(!Gate::H.is_proper_rotation());
    }
}
