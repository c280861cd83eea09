//! Instructions combining an operation with its operands.

use serde::{Deserialize, Serialize};

use crate::condition::BinaryFunction;
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};
use crate::wire::WireInstruction;

/// The kind of instruction in an experiment.
#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement of a qubit into a classical bit.
    Measure,
    /// Barrier (scheduling hint only).
    Barrier,
    /// Declaration of a classical condition for later conditional instructions.
    BinaryFunction(BinaryFunction),
    /// An operation the translator has no mapping for, kept by name.
    Unsupported(String),
}

/// A complete instruction with operands.
///
/// Serializes through the flat Qobj shape of [`WireInstruction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireInstruction", into = "WireInstruction")]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits written by this instruction (for measure).
    pub memory: Vec<ClbitId>,
    /// Register slot of the binary function gating this instruction.
    pub conditional: Option<u32>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            memory: vec![],
            conditional: None,
        }
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            memory: vec![clbit],
            conditional: None,
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            memory: vec![],
            conditional: None,
        }
    }

    /// Create a binary function declaration.
    pub fn binary_function(bfunc: BinaryFunction) -> Self {
        Self {
            kind: InstructionKind::BinaryFunction(bfunc),
            qubits: vec![],
            memory: vec![],
            conditional: None,
        }
    }

    /// Create an instruction for an operation without a cQASM mapping.
    pub fn unsupported(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Unsupported(name.into()),
            qubits: qubits.into_iter().collect(),
            memory: vec![],
            conditional: None,
        }
    }

    /// Gate this instruction on the binary function stored in `register`.
    #[must_use]
    pub fn with_condition(mut self, register: u32) -> Self {
        self.conditional = Some(register);
        self
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this instruction is classically conditioned.
    pub fn is_conditional(&self) -> bool {
        self.conditional.is_some()
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the wire name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::BinaryFunction(_) => "bfunc",
            InstructionKind::Unsupported(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::gate(StandardGate::H, [QubitId(0)]);
        assert!(inst.is_gate());
        assert!(!inst.is_conditional());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(1), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.memory, vec![ClbitId(0)]);
    }

    #[test]
    fn test_conditional_instruction() {
        let inst = Instruction::gate(StandardGate::X, [QubitId(0)]).with_condition(3);
        assert!(inst.is_conditional());
        assert_eq!(inst.conditional, Some(3));
    }

    #[test]
    fn test_unsupported_name() {
        let inst = Instruction::unsupported("bla", [QubitId(1)]);
        assert_eq!(inst.name(), "bla");
        assert!(inst.as_gate().is_none());
    }

    #[test]
    fn test_bfunc_name() {
        let inst = Instruction::binary_function(BinaryFunction::equal(1, 0xF, 0xE));
        assert_eq!(inst.name(), "bfunc");
    }
}
