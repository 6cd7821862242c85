//! Alsvid Circuit Optimization Engine
//!
//! Rewrites circuits over the CNOT + π/4-rotation + Clifford gate set into
//! equivalent but cheaper circuits: fewer non-Clifford rotations, lower
//! rotation-depth, fewer two-wire gates.
//!
//! # Architecture
//!
//! Optimization is organized as an ordered chain of [`Pass`]es run by a
//! [`PassManager`]. Each pass consumes an immutable [`alsvid_ir::Circuit`]
//! and produces a new one; the chain short-circuits at the first failure
//! and surfaces the reason verbatim.
//!
//! ```text
//! Input Circuit
//!       │ (wire validation — MalformedCircuit aborts here)
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── ordered [PassRequest]
//! └─────────────┘
//!       ├── PhaseFold          merge rotations sharing a parity
//!       ├── RotationSchedule   depth-minimal rotation layers
//!       ├── LinearResynth      near-minimal CNOT skeleton
//!       └── Simplify           peephole cancellation to fixpoint
//!       │
//!       ▼
//! Output Circuit
//! ```
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, QubitId};
//! use alsvid_opt::{PassManager, PassRequest};
//!
//! let mut circuit = Circuit::with_wires("demo", 2);
//! circuit.cnot(QubitId(1), QubitId(0)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//! circuit.cnot(QubitId(1), QubitId(0)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//!
//! let pm = PassManager::from_requests(&[PassRequest::PhaseFold]);
//! let optimized = pm.run(&circuit).unwrap();
//! assert_eq!(optimized.num_gates(), 3); // the two Ts merged into one S
//! ```

pub mod error;
pub mod pass;
pub mod phase;
pub mod synth;

// Built-in passes
pub mod passes;

pub use error::{OptError, OptResult};
pub use pass::{Pass, PassManager, PassRequest};
pub use passes::{LinearResynth, PhaseFold, RotationSchedule, Simplify};
