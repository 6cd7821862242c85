//! Pass trait, named pass requests, and the short-circuiting manager.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use alsvid_ir::Circuit;

use crate::error::{OptError, OptResult};
use crate::passes::{LinearResynth, PhaseFold, RotationSchedule, Simplify};

/// An optimization pass over immutable circuit values.
///
/// Passes are pure: they consume a circuit and produce a new one, never
/// mutating their input. A pass either succeeds with the rewritten
/// circuit or fails with the reason; it must not repair or retry.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass, producing a new circuit.
    fn run(&self, circuit: &Circuit) -> OptResult<Circuit>;
}

/// A named pass request, the configuration unit handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassRequest {
    /// Merge rotations sharing a parity.
    PhaseFold,
    /// Partition rotations into depth-minimal layers.
    RotationDepthSchedule,
    /// Resynthesize the CNOT skeleton at near-minimal gate count.
    LinearResynthesize,
    /// Local cancellation/commutation to a fixed point.
    Simplify,
}

impl PassRequest {
    /// The request's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            PassRequest::PhaseFold => "phase-fold",
            PassRequest::RotationDepthSchedule => "rotation-depth-schedule",
            PassRequest::LinearResynthesize => "linear-resynthesize",
            PassRequest::Simplify => "simplify",
        }
    }

    /// Instantiate the pass this request names.
    pub fn build(&self) -> Box<dyn Pass> {
        match self {
            PassRequest::PhaseFold => Box::new(PhaseFold),
            PassRequest::RotationDepthSchedule => Box::new(RotationSchedule),
            PassRequest::LinearResynthesize => Box::new(LinearResynth),
            PassRequest::Simplify => Box::new(Simplify),
        }
    }
}

impl FromStr for PassRequest {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phase-fold" => Ok(PassRequest::PhaseFold),
            "rotation-depth-schedule" => Ok(PassRequest::RotationDepthSchedule),
            "linear-resynthesize" => Ok(PassRequest::LinearResynthesize),
            "simplify" => Ok(PassRequest::Simplify),
            other => Err(OptError::UnknownPass(other.to_string())),
        }
    }
}

/// Runs an ordered list of passes, stopping at the first failure.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Build a manager from an ordered list of requests.
    pub fn from_requests(requests: &[PassRequest]) -> Self {
        let mut pm = Self::new();
        for request in requests {
            pm.passes.push(request.build());
        }
        pm
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes over `circuit`, producing the final circuit.
    ///
    /// The input is wire-validated once up front, so a malformed circuit
    /// fails before any pass runs. Each pass consumes the previous output;
    /// the first failing pass short-circuits the chain and its reason is
    /// surfaced verbatim.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit) -> OptResult<Circuit> {
        circuit.validate()?;

        info!(
            "Running {} passes on '{}' ({} gates, {} wires)",
            self.passes.len(),
            circuit.name(),
            circuit.num_gates(),
            circuit.num_qubits()
        );

        let mut current = circuit.clone();
        for pass in &self.passes {
            debug!("Running pass: {}", pass.name());
            current = pass.run(&current)?;
            debug!("Pass {} completed, gates: {}", pass.name(), current.num_gates());
        }

        info!("Pass chain completed, final gates: {}", current.num_gates());
        Ok(current)
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}
