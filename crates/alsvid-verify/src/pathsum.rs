//! Symbolic path-sum construction.

use alsvid_gf2::{AffineParity, Octant};
use alsvid_ir::{Circuit, Gate, Instruction, QubitId};
use rustc_hash::FxHashMap;

use crate::error::{VerifyError, VerifyResult};
use crate::polynomial::PhasePoly;

/// A circuit's action as a sum over paths: for each assignment of the path
/// variables, the amplitude `(1/√2)^{-sqrt2} · ω^{phase}` on the basis
/// state given by the output parities. Summing over all path-variable
/// assignments reproduces the circuit's unitary, up to global phase.
///
/// Variables `0..num_inputs` are the primary inputs; variables allocated
/// above that are path variables introduced by Hadamards. Ancilla wires
/// start at the constant-zero parity.
#[derive(Debug, Clone)]
pub struct PathSum {
    /// Number of primary-input variables.
    num_inputs: usize,
    /// Total variables allocated (inputs + path variables).
    num_vars: usize,
    /// Parity carried by each wire, over inputs ∪ path variables.
    outputs: Vec<AffineParity>,
    /// The phase polynomial.
    phase: PhasePoly,
    /// Exponent of √2 normalization: −1 per Hadamard, restored by the
    /// reduction rules.
    sqrt2: i32,
}

impl PathSum {
    /// The path-sum of the identity on `circuit`'s wires: each input wire
    /// carries its own variable, each ancilla the constant zero.
    pub fn identity(circuit: &Circuit) -> Self {
        let num_inputs = circuit.inputs().len();
        let mut outputs = vec![AffineParity::zero(); circuit.num_qubits()];
        for (var, wire) in circuit.inputs().iter().enumerate() {
            outputs[wire.index()] = AffineParity::unit(var);
        }
        Self {
            num_inputs,
            num_vars: num_inputs,
            outputs,
            phase: PhasePoly::new(),
            sqrt2: 0,
        }
    }

    /// Build the path-sum of a whole circuit.
    pub fn of_circuit(circuit: &Circuit) -> Self {
        let mut sum = Self::identity(circuit);
        for inst in circuit.gates() {
            sum.apply(inst);
        }
        sum
    }

    /// Build the miter path-sum of `original` against `candidate`: the
    /// original followed by the candidate's structural inverse (gate order
    /// reversed, rotation angles negated). The miter reduces to the
    /// identity path-sum exactly when the two circuits agree up to global
    /// phase.
    pub fn miter(original: &Circuit, candidate: &Circuit) -> VerifyResult<Self> {
        if !original.same_inputs(candidate) {
            return Err(VerifyError::InputMismatch(format!(
                "'{}' declares inputs [{}], '{}' declares [{}]",
                original.name(),
                join_inputs(original),
                candidate.name(),
                join_inputs(candidate),
            )));
        }
        // The candidate's gates address its own wire ids; translate by
        // declared name so both circuits act on the original's wires.
        let by_name: FxHashMap<&str, QubitId> = original
            .qubits()
            .iter()
            .map(|q| (q.name.as_str(), q.id))
            .collect();
        let mut translated: Vec<Instruction> = Vec::with_capacity(candidate.num_gates());
        for inst in candidate.gates() {
            let mut qubits = Vec::with_capacity(inst.qubits.len());
            for &q in &inst.qubits {
                let name = candidate.wire_name(q);
                let mapped = by_name.get(name).ok_or_else(|| {
                    VerifyError::InputMismatch(format!(
                        "wire '{name}' of '{}' is not declared by '{}'",
                        candidate.name(),
                        original.name(),
                    ))
                })?;
                qubits.push(*mapped);
            }
            translated.push(Instruction::new(inst.gate, qubits));
        }

        let mut sum = Self::of_circuit(original);
        for inst in translated.iter().rev() {
            sum.apply(&inst.inverse());
        }
        Ok(sum)
    }

    /// Apply one gate to the evolving path-sum.
    pub fn apply(&mut self, inst: &Instruction) {
        match inst.gate {
            Gate::Cnot => {
                let control = self.outputs[inst.control().index()].clone();
                self.outputs[inst.target().index()] ^= &control;
            }
            Gate::X => self.outputs[inst.qubits[0].index()].negate(),
            Gate::Y => {
                // Y = i·X·Z: phase π on the carried parity, then the flip,
                // plus a global quarter turn.
                let wire = inst.qubits[0].index();
                let state = self.outputs[wire].clone();
                self.phase.add_lifted(&state, Octant::Z);
                self.outputs[wire].negate();
                self.phase.add_constant(Octant::S);
            }
            Gate::Swap => {
                let (a, b) = (inst.qubits[0].index(), inst.qubits[1].index());
                self.outputs.swap(a, b);
            }
            Gate::Phase(angle) => {
                let state = self.outputs[inst.qubits[0].index()].clone();
                self.phase.add_lifted(&state, angle);
            }
            Gate::H => {
                let wire = inst.qubits[0].index();
                let y = self.fresh_var();
                let state = self.outputs[wire].clone();
                self.phase.add_hadamard_coupling(&state, y);
                self.outputs[wire] = AffineParity::unit(y);
                self.sqrt2 -= 1;
            }
        }
    }

    fn fresh_var(&mut self) -> usize {
        let v = self.num_vars;
        self.num_vars += 1;
        v
    }

    /// Number of primary-input variables.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// The path variables allocated so far.
    pub fn path_vars(&self) -> impl Iterator<Item = usize> + '_ {
        self.num_inputs..self.num_vars
    }

    /// The parity carried by wire `w`.
    pub fn output(&self, w: usize) -> &AffineParity {
        &self.outputs[w]
    }

    /// All wire parities.
    pub fn outputs(&self) -> &[AffineParity] {
        &self.outputs
    }

    /// Mutable access for the reduction rules.
    pub(crate) fn outputs_mut(&mut self) -> &mut [AffineParity] {
        &mut self.outputs
    }

    /// The phase polynomial.
    pub fn phase(&self) -> &PhasePoly {
        &self.phase
    }

    /// Mutable access for the reduction rules.
    pub(crate) fn phase_mut(&mut self) -> &mut PhasePoly {
        &mut self.phase
    }

    /// The √2 normalization exponent.
    pub fn sqrt2(&self) -> i32 {
        self.sqrt2
    }

    pub(crate) fn add_sqrt2(&mut self, delta: i32) {
        self.sqrt2 += delta;
    }

    /// Whether `var` occurs in any wire parity.
    pub fn var_in_outputs(&self, var: usize) -> bool {
        self.outputs.iter().any(|p| p.linear.get(var))
    }
}

fn join_inputs(circuit: &Circuit) -> String {
    circuit
        .inputs()
        .iter()
        .map(|&q| circuit.wire_name(q))
        .collect::<Vec<_>>()
        .join(", ")
}
