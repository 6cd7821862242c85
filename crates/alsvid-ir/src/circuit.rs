//! The flat circuit value.

use alsvid_gf2::Octant;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};

/// A quantum circuit as an ordered, flat gate sequence.
///
/// A circuit declares its wires, marks which of them are primary inputs
/// (the rest are internal ancillas), and carries the gate list. Circuits
/// are treated as immutable values by the optimizer: every pass builds a
/// new circuit with [`Circuit::with_gates`] rather than mutating its
/// input, so intermediate results stay inspectable and comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Declared wires, in declaration order.
    qubits: Vec<Qubit>,
    /// Primary-input wires, in declaration order.
    inputs: Vec<QubitId>,
    /// The gate sequence.
    gates: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            inputs: vec![],
            gates: vec![],
        }
    }

    /// Create a circuit with `n` wires named `q0..`, all primary inputs.
    pub fn with_wires(name: impl Into<String>, n: u32) -> Self {
        let mut circuit = Self::new(name);
        for i in 0..n {
            let id = circuit.add_wire(format!("q{i}"));
            circuit.inputs.push(id);
        }
        circuit
    }

    /// Assemble a circuit from parts, validating every gate and input.
    pub fn from_parts(
        name: impl Into<String>,
        qubits: Vec<Qubit>,
        inputs: Vec<QubitId>,
        gates: Vec<Instruction>,
    ) -> IrResult<Self> {
        let circuit = Self {
            name: name.into(),
            qubits,
            inputs,
            gates,
        };
        circuit.validate()?;
        Ok(circuit)
    }

    /// Declare a new wire (not a primary input).
    pub fn add_wire(&mut self, name: impl Into<String>) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id, name));
        id
    }

    /// Mark a declared wire as a primary input.
    pub fn mark_input(&mut self, wire: QubitId) -> IrResult<()> {
        if wire.index() >= self.qubits.len() {
            return Err(IrError::UndeclaredInput { wire });
        }
        if !self.inputs.contains(&wire) {
            self.inputs.push(wire);
        }
        Ok(())
    }

    /// Append an instruction, validating it against the declared wires.
    pub fn push(&mut self, inst: Instruction) -> IrResult<&mut Self> {
        self.check_instruction(&inst)?;
        self.gates.push(inst);
        Ok(self)
    }

    /// Apply Hadamard.
    pub fn h(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::h(q))
    }

    /// Apply Pauli-X.
    pub fn x(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::x(q))
    }

    /// Apply Pauli-Y.
    pub fn y(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::y(q))
    }

    /// Apply a rotation of `angle`.
    pub fn phase(&mut self, angle: Octant, q: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::phase(angle, q))
    }

    /// Apply T.
    pub fn t(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.phase(Octant::T, q)
    }

    /// Apply S.
    pub fn s(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.phase(Octant::S, q)
    }

    /// Apply Z.
    pub fn z(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.phase(Octant::Z, q)
    }

    /// Apply controlled-NOT.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::cnot(control, target))
    }

    /// Apply swap.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::swap(a, b))
    }

    /// Check every gate and input marker against the declared wires.
    ///
    /// The optimizer runs this once before its first pass; a failure here
    /// is the malformed-circuit condition and nothing else runs.
    pub fn validate(&self) -> IrResult<()> {
        for inst in &self.gates {
            self.check_instruction(inst)?;
        }
        for &wire in &self.inputs {
            if wire.index() >= self.qubits.len() {
                return Err(IrError::UndeclaredInput { wire });
            }
        }
        Ok(())
    }

    fn check_instruction(&self, inst: &Instruction) -> IrResult<()> {
        let expected = inst.gate.num_qubits();
        if inst.qubits.len() != expected as usize {
            return Err(IrError::ArityMismatch {
                gate: inst.gate.name().to_string(),
                expected,
                got: inst.qubits.len(),
            });
        }
        for (i, &wire) in inst.qubits.iter().enumerate() {
            if wire.index() >= self.qubits.len() {
                return Err(IrError::UndeclaredWire {
                    gate: inst.gate.name().to_string(),
                    wire,
                });
            }
            if inst.qubits[..i].contains(&wire) {
                return Err(IrError::DuplicateOperand {
                    gate: inst.gate.name().to_string(),
                    wire,
                });
            }
        }
        Ok(())
    }

    /// A new circuit with the same wires and inputs but a different gate
    /// sequence. This is how passes produce their output.
    ///
    /// The gates are not re-validated: passes only emit gates over wires
    /// of the circuit they were given.
    pub fn with_gates(&self, gates: Vec<Instruction>) -> Circuit {
        Circuit {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            inputs: self.inputs.clone(),
            gates,
        }
    }

    /// The same circuit under a different name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Circuit {
        self.name = name.into();
        self
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared wires.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Declared wires.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Primary-input wires.
    pub fn inputs(&self) -> &[QubitId] {
        &self.inputs
    }

    /// Whether `wire` is a primary input.
    pub fn is_input(&self, wire: QubitId) -> bool {
        self.inputs.contains(&wire)
    }

    /// The gate sequence.
    pub fn gates(&self) -> &[Instruction] {
        &self.gates
    }

    /// Number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// The declared name of a wire.
    pub fn wire_name(&self, wire: QubitId) -> &str {
        &self.qubits[wire.index()].name
    }

    /// Whether two circuits declare the same primary inputs, by name and
    /// order. This is the precondition for equivalence checking.
    pub fn same_inputs(&self, other: &Circuit) -> bool {
        self.inputs.len() == other.inputs.len()
            && self
                .inputs
                .iter()
                .zip(&other.inputs)
                .all(|(a, b)| self.wire_name(*a) == other.wire_name(*b))
    }

    /// Count gates of a given kind.
    pub fn count_gates(&self, gate: Gate) -> usize {
        self.gates.iter().filter(|i| i.gate == gate).count()
    }

    /// Count phase gates of any angle.
    pub fn count_phase_gates(&self) -> usize {
        self.gates.iter().filter(|i| i.is_phase()).count()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit {} ({} wires)", self.name, self.qubits.len())?;
        for inst in &self.gates {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
