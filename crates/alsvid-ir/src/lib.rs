//! Alsvid Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits as flat,
//! ordered gate sequences over a small universal gate set. This crate is
//! the foundation the optimizer ([`alsvid-opt`]) and the equivalence
//! checker ([`alsvid-verify`]) operate on.
//!
//! # Overview
//!
//! A [`Circuit`] declares an ordered wire list, marks which wires are
//! primary inputs (the rest are ancillas), and carries the gate sequence.
//! Circuits are immutable values from the optimizer's point of view:
//! every pass produces a new circuit rather than mutating its input.
//!
//! The gate vocabulary ([`Gate`]) is deliberately small: controlled-NOT,
//! Z-axis rotations in exact multiples of π/4 ([`alsvid_gf2::Octant`]),
//! and the fixed single-wire Clifford generators H, X, Y plus Swap.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, CircuitStats, QubitId};
//!
//! let mut circuit = Circuit::with_wires("example", 2);
//! circuit.cnot(QubitId(0), QubitId(1)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//!
//! let stats = CircuitStats::of(&circuit);
//! assert_eq!(stats.gates, 2);
//! assert_eq!(stats.rotations, 1);
//! ```
//!
//! [`alsvid-opt`]: ../alsvid_opt/index.html
//! [`alsvid-verify`]: ../alsvid_verify/index.html

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod stats;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::Instruction;
pub use qubit::{Qubit, QubitId};
pub use stats::CircuitStats;
