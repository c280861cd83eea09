//! Quire Instruction Stream Representation
//!
//! This crate holds the data the cQASM translator consumes: an ordered stream
//! of gate instructions grouped into experiments, as produced by an external
//! circuit compiler in the Qobj JSON format.
//!
//! # Core Components
//!
//! - **Identifiers**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`], a closed set of the gates the translator maps
//! - **Conditions**: [`BinaryFunction`] and [`Relation`] for classically
//!   controlled instructions
//! - **Instructions**: [`Instruction`] with [`InstructionKind`]; names without a
//!   mapping are kept as [`InstructionKind::Unsupported`]
//! - **Envelope**: [`Experiment`], [`ExperimentHeader`], [`Qobj`]
//!
//! # Example
//!
//! ```rust
//! use quire_ir::{Experiment, InstructionKind, StandardGate};
//!
//! let json = r#"{
//!     "header": {"name": "bell", "n_qubits": 2, "memory_slots": 2},
//!     "instructions": [
//!         {"name": "h", "qubits": [0]},
//!         {"name": "cx", "qubits": [0, 1]}
//!     ]
//! }"#;
//!
//! let experiment = Experiment::from_json(json).unwrap();
//! assert_eq!(experiment.num_qubits(), 2);
//! assert_eq!(experiment.instructions[0].kind, InstructionKind::Gate(StandardGate::H));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Parameters |
//! |------|--------|------------|
//! | `id`, `x`, `y`, `z`, `h` | 1 | - |
//! | `s`, `sdg`, `t`, `tdg` | 1 | - |
//! | `rx`, `ry`, `rz`, `u1` | 1 | 1 |
//! | `u2` | 1 | 2 |
//! | `u`, `u3` | 1 | 3 |
//! | `cx`, `cz`, `swap` | 2 | - |
//! | `ccx` | 3 | - |

pub mod condition;
pub mod error;
pub mod experiment;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod wire;

pub use condition::{BinaryFunction, Relation};
pub use error::{IrError, IrResult};
pub use experiment::{Experiment, ExperimentHeader, Qobj, QobjConfig};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
pub use wire::WireInstruction;
