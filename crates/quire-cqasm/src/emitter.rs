//! cQASM emitter for instruction streams.

use std::f64::consts::FRAC_PI_2;

use quire_ir::{BinaryFunction, Experiment, Instruction, InstructionKind, Relation, StandardGate};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::EmitterConfig;
use crate::error::{EmitError, EmitResult};
use crate::mask::mask_data;

/// Emit an experiment as cQASM with the default configuration.
pub fn emit(experiment: &Experiment) -> EmitResult<String> {
    emit_with_config(experiment, &EmitterConfig::default())
}

/// Emit an experiment as cQASM.
pub fn emit_with_config(experiment: &Experiment, config: &EmitterConfig) -> EmitResult<String> {
    emit_instructions(&experiment.instructions, experiment.num_qubits(), config)
}

/// Emit an ordered instruction stream for a register of `num_qubits` qubits.
pub fn emit_instructions(
    instructions: &[Instruction],
    num_qubits: u32,
    config: &EmitterConfig,
) -> EmitResult<String> {
    debug!(
        "Emitting cQASM for {} instructions on {} qubits",
        instructions.len(),
        num_qubits
    );
    let mut emitter = Emitter::new(config);
    emitter.emit_program(instructions, num_qubits)
}

/// Format an angle with the fixed six-decimal precision of cQASM statements.
#[inline]
pub fn format_angle(angle: f64) -> String {
    format!("{angle:.6}")
}

/// Whether an angle prints as zero at cQASM precision.
#[inline]
fn is_negligible(angle: f64) -> bool {
    format_angle(angle.abs()) == "0.000000"
}

/// cQASM emitter.
///
/// Holds the binary functions declared so far; a conditional instruction
/// may only refer to a register slot declared earlier in the stream.
struct Emitter<'a> {
    output: String,
    config: &'a EmitterConfig,
    conditions: FxHashMap<u32, BinaryFunction>,
}

impl<'a> Emitter<'a> {
    fn new(config: &'a EmitterConfig) -> Self {
        Self {
            output: String::new(),
            config,
            conditions: FxHashMap::default(),
        }
    }

    fn emit_program(&mut self, instructions: &[Instruction], num_qubits: u32) -> EmitResult<String> {
        self.writeln("version 1.0");
        let comment = format!("# {}", self.config.header_comment);
        self.writeln(&comment);
        self.writeln(&format!("qubits {num_qubits}"));

        for instruction in instructions {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        match &instruction.kind {
            InstructionKind::BinaryFunction(bfunc) => {
                self.conditions.insert(bfunc.register, bfunc.clone());
                return Ok(());
            }
            // Barriers only constrain scheduling; cQASM has nothing to say about them.
            InstructionKind::Barrier => return Ok(()),
            _ => {}
        }

        match instruction.conditional {
            None => {
                for line in self.statements(instruction, None)? {
                    self.writeln(&line);
                }
                Ok(())
            }
            Some(register) => self.emit_conditional(instruction, register),
        }
    }

    /// Wrap the statements of a conditional instruction in its bit negation.
    ///
    /// cQASM binary-controlled gates fire when every control bit is 1. An
    /// equality test against a value with zero bits is expressed by inverting
    /// those bits before the gate and restoring them afterwards.
    fn emit_conditional(&mut self, instruction: &Instruction, register: u32) -> EmitResult<()> {
        let bfunc = self
            .conditions
            .get(&register)
            .cloned()
            .ok_or(EmitError::ConditionalNotFound(register))?;

        if bfunc.relation != Relation::Equal {
            return Err(EmitError::UnsupportedRelation(bfunc.relation.to_string()));
        }
        if bfunc.mask == 0 {
            return Err(EmitError::MissingMask(instruction.name().to_string()));
        }

        let (lowest, length) = mask_data(bfunc.mask);
        let lowest = lowest.unsigned_abs();
        let control = if length == 1 {
            format!("b[{lowest}]")
        } else {
            format!("b[{lowest}:{}]", lowest + length - 1)
        };

        let lines = self.statements(instruction, Some(&control))?;
        if lines.is_empty() {
            return Ok(());
        }

        let negation = negated_bits(&bfunc, lowest, length);
        if let Some(negation) = &negation {
            trace!("Condition on register {} negates {}", register, negation);
            self.writeln(negation);
        }
        for line in &lines {
            self.writeln(line);
        }
        if let Some(negation) = &negation {
            self.writeln(negation);
        }

        Ok(())
    }

    /// Statements for one instruction, optionally under a binary control.
    ///
    /// Returns no statements when the instruction is a numeric no-op or a
    /// measurement under full-state projection.
    fn statements(&self, instruction: &Instruction, control: Option<&str>) -> EmitResult<Vec<String>> {
        let conditional = control.is_some();
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                if instruction.qubits.len() != gate.num_qubits() {
                    return Err(EmitError::WrongQubitCount {
                        gate: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: instruction.qubits.len(),
                    });
                }
                Ok(self.gate_statements(gate, instruction, control))
            }

            InstructionKind::Measure if conditional => Err(EmitError::UnsupportedConditionalGate(
                instruction.name().to_string(),
            )),

            InstructionKind::Measure => {
                if self.config.full_state_projection {
                    return Ok(vec![]);
                }
                Ok(instruction
                    .qubits
                    .iter()
                    .map(|q| format!("measure q[{}]", q.0))
                    .collect())
            }

            InstructionKind::Unsupported(name) if conditional => {
                Err(EmitError::UnsupportedConditionalGate(name.clone()))
            }

            InstructionKind::Unsupported(name) => Err(EmitError::UnsupportedGate(name.clone())),

            InstructionKind::Barrier | InstructionKind::BinaryFunction(_) => Ok(vec![]),
        }
    }

    fn gate_statements(
        &self,
        gate: &StandardGate,
        instruction: &Instruction,
        control: Option<&str>,
    ) -> Vec<String> {
        let qubits = self.emit_qubits(instruction);
        let statement = |name: &str, angle: Option<f64>| {
            let mut line = match control {
                Some(bits) => format!("C-{name} {bits}, {qubits}"),
                None => format!("{name} {qubits}"),
            };
            if let Some(angle) = angle {
                line.push_str(", ");
                line.push_str(&format_angle(angle));
            }
            line
        };

        match *gate {
            StandardGate::I => vec![statement("I", None)],
            StandardGate::X => vec![statement("X", None)],
            StandardGate::Y => vec![statement("Y", None)],
            StandardGate::Z => vec![statement("Z", None)],
            StandardGate::H => vec![statement("H", None)],
            StandardGate::S => vec![statement("S", None)],
            StandardGate::Sdg => vec![statement("Sdag", None)],
            StandardGate::T => vec![statement("T", None)],
            StandardGate::Tdg => vec![statement("Tdag", None)],
            StandardGate::CX => vec![statement("CNOT", None)],
            StandardGate::CZ => vec![statement("CZ", None)],
            StandardGate::Swap => vec![statement("SWAP", None)],
            StandardGate::CCX => vec![statement("Toffoli", None)],
            StandardGate::Rx(angle) => vec![statement("Rx", Some(angle))],
            StandardGate::Ry(angle) => vec![statement("Ry", Some(angle))],
            StandardGate::Rz(angle) => vec![statement("Rz", Some(angle))],
            StandardGate::U(theta, phi, lambda) | StandardGate::U3(theta, phi, lambda) => {
                euler_rotations(theta, phi, lambda)
                    .map(|(axis, angle)| statement(axis, Some(angle)))
                    .collect()
            }
            StandardGate::U2(phi, lambda) => euler_rotations(FRAC_PI_2, phi, lambda)
                .map(|(axis, angle)| statement(axis, Some(angle)))
                .collect(),
            StandardGate::U1(lambda) => euler_rotations(0.0, 0.0, lambda)
                .map(|(axis, angle)| statement(axis, Some(angle)))
                .collect(),
        }
    }

    fn emit_qubits(&self, instruction: &Instruction) -> String {
        instruction
            .qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Rz(λ)·Ry(θ)·Rz(φ) decomposition of U(θ, φ, λ), skipping zero rotations.
fn euler_rotations(theta: f64, phi: f64, lambda: f64) -> impl Iterator<Item = (&'static str, f64)> {
    [("Rz", lambda), ("Ry", theta), ("Rz", phi)]
        .into_iter()
        .filter(|&(_, angle)| !is_negligible(angle))
}

/// The `not` statement flipping every span bit the condition requires to be 0.
fn negated_bits(bfunc: &BinaryFunction, lowest: u32, length: u32) -> Option<String> {
    let masked_value = bfunc.masked_value();
    if masked_value == bfunc.mask {
        return None;
    }
    let bits = (lowest..lowest + length)
        .filter(|&bit| masked_value & (1u64 << bit) == 0)
        .map(|bit| bit.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("not b[{bits}]"))
}
