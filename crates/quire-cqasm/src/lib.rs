//! cQASM Emitter for Quire
//!
//! This crate translates a Qobj instruction stream into a cQASM 1.0 program
//! text, the input format of the Quantum Inspire simulator.
//!
//! # Statement Mapping
//!
//! | Instruction | cQASM |
//! |-------------|-------|
//! | `id`, `x`, `y`, `z`, `h` | `I`, `X`, `Y`, `Z`, `H` |
//! | `s`, `sdg`, `t`, `tdg` | `S`, `Sdag`, `T`, `Tdag` |
//! | `cx`, `cz`, `swap`, `ccx` | `CNOT`, `CZ`, `SWAP`, `Toffoli` |
//! | `rx`, `ry`, `rz` | `Rx`, `Ry`, `Rz` with the angle |
//! | `u`, `u3`, `u2`, `u1` | `Rz`/`Ry`/`Rz` sequence, zero angles dropped |
//! | `measure` | nothing under full-state projection, else `measure q[i]` |
//! | `barrier`, `bfunc` | nothing |
//!
//! A conditional instruction becomes a binary-controlled `C-` statement over
//! the masked classical bits, wrapped in `not` statements when the compared
//! value has zero bits inside the mask span.
//!
//! # Example
//!
//! ```rust
//! use quire_ir::{BinaryFunction, Experiment, ExperimentHeader, Instruction, QubitId, StandardGate};
//! use quire_cqasm::emit;
//!
//! let experiment = Experiment::new(
//!     ExperimentHeader::new("conditional", 2, 4),
//!     vec![
//!         Instruction::binary_function(BinaryFunction::equal(1, 0xF, 0xE)),
//!         Instruction::gate(StandardGate::CZ, [QubitId(0), QubitId(1)]).with_condition(1),
//!     ],
//! );
//!
//! let cqasm = emit(&experiment).unwrap();
//! assert!(cqasm.starts_with("version 1.0\n"));
//! assert!(cqasm.contains("not b[0]\nC-CZ b[0:3], q[0], q[1]\nnot b[0]\n"));
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod mask;

pub use config::{DEFAULT_HEADER_COMMENT, EmitterConfig};
pub use emitter::{emit, emit_instructions, emit_with_config, format_angle};
pub use error::{EmitError, EmitResult};
pub use mask::mask_data;
