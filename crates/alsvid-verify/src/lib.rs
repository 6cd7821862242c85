//! Alsvid Path-Sum Verification Engine
//!
//! Certifies that a rewritten circuit still implements the unitary of the
//! original, up to global phase, by symbolic reduction rather than
//! simulation.
//!
//! # How it works
//!
//! A circuit over the CNOT + π/4-rotation + Clifford set has a closed-form
//! *path-sum*: outputs are affine GF(2) functions of the inputs and of one
//! path variable per Hadamard, and the amplitude's phase is a multilinear
//! polynomial with Z/8 coefficients over those variables ([`PathSum`]).
//!
//! To compare circuits `C` and `C′`, the engine builds the *miter* — `C`
//! followed by the structural inverse of `C′` — and reduces its path-sum
//! with three rewrite rules applied to a fixed point: elimination (a
//! variable touching nothing sums to a constant factor), matching (a
//! `4·y·(y′⊕f)` pattern forces `y′ = f`), and omega (a `±2·y + 4·y·f`
//! pattern folds into a linear residual). Reduction to the identity
//! path-sum certifies equivalence.
//!
//! The procedure is sound in both directions: non-equivalence is only
//! reported once every path variable is resolved (the residual is then a
//! concrete amplitude discrepancy), and anything else is reported as
//! [`Verdict::Inconclusive`] — never as a false equivalence.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, QubitId};
//! use alsvid_verify::check_equivalence;
//!
//! let mut original = Circuit::with_wires("original", 1);
//! original.t(QubitId(0)).unwrap();
//! original.t(QubitId(0)).unwrap();
//!
//! let mut merged = Circuit::with_wires("merged", 1);
//! merged.s(QubitId(0)).unwrap();
//!
//! assert!(check_equivalence(&original, &merged).unwrap().is_equivalent());
//! ```

pub mod error;
pub mod pathsum;
pub mod polynomial;
pub mod reduce;

pub use error::{VerifyError, VerifyResult};
pub use pathsum::PathSum;
pub use polynomial::{Monomial, PhasePoly};
pub use reduce::{Verdict, Witness, check_equivalence};
