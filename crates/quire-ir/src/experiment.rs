//! Experiments and the Qobj job envelope.

use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::instruction::Instruction;

/// Per-experiment metadata supplied by the circuit compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentHeader {
    /// Experiment name.
    #[serde(default)]
    pub name: String,
    /// Number of qubits in the quantum register.
    pub n_qubits: u32,
    /// Number of classical bits.
    pub memory_slots: u32,
    /// Classical registers as `(name, size)` pairs.
    #[serde(default)]
    pub creg_sizes: Vec<(String, u32)>,
}

impl ExperimentHeader {
    /// Create a header with one classical register `c` of `memory_slots` bits.
    pub fn new(name: impl Into<String>, n_qubits: u32, memory_slots: u32) -> Self {
        Self {
            name: name.into(),
            n_qubits,
            memory_slots,
            creg_sizes: vec![("c".into(), memory_slots)],
        }
    }
}

/// One circuit to execute: header plus an ordered instruction stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Experiment metadata.
    pub header: ExperimentHeader,
    /// Ordered instructions.
    pub instructions: Vec<Instruction>,
}

impl Experiment {
    /// Create a new experiment.
    pub fn new(header: ExperimentHeader, instructions: Vec<Instruction>) -> Self {
        Self {
            header,
            instructions,
        }
    }

    /// Parse an experiment from its JSON representation.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of qubits in the quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.header.n_qubits
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.header.memory_slots
    }

    /// Iterate over the measurement instructions in order.
    pub fn measurements(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().filter(|i| i.is_measure())
    }
}

/// Run configuration shared by all experiments of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QobjConfig {
    /// Number of shots per experiment.
    pub shots: u32,
    /// Whether per-shot memory was requested.
    #[serde(default)]
    pub memory: bool,
}

/// A job envelope holding one or more experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qobj {
    /// Identifier assigned by the compiler.
    #[serde(default)]
    pub qobj_id: String,
    /// Run configuration.
    pub config: QobjConfig,
    /// Experiments to execute.
    pub experiments: Vec<Experiment>,
}

impl Qobj {
    /// Parse a job envelope from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
