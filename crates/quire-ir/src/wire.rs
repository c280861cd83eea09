//! Qobj instruction wire format.
//!
//! Instructions arrive as flat JSON objects:
//!
//! ```json
//! {"name": "bfunc", "register": 1, "mask": "0xF", "relation": "==", "val": "0xE"}
//! {"name": "cx", "qubits": [0, 1], "conditional": 1}
//! {"name": "u3", "qubits": [0], "params": [1.0, 2.0, 3.0]}
//! {"name": "measure", "qubits": [0], "memory": [0]}
//! ```
//!
//! [`WireInstruction`] mirrors that shape and converts into the typed
//! [`Instruction`].

use serde::{Deserialize, Serialize};

use crate::condition::{BinaryFunction, Relation};
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Flat JSON shape of a single instruction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireInstruction {
    /// Operation name (`h`, `cx`, `measure`, `bfunc`, ...).
    pub name: String,
    /// Target qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qubits: Vec<u32>,
    /// Gate angles in radians.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Memory slots written by a measurement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub memory: Vec<u32>,
    /// Register slot of the binary function gating this instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<u32>,
    /// `bfunc` only: register slot being declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<u32>,
    /// `bfunc` only: hex mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// `bfunc` only: relation symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// `bfunc` only: hex comparison value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
}

/// Parse a hex integer such as `0xF` or `1f`.
pub fn parse_hex(field: &'static str, value: &str) -> IrResult<u64> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16).map_err(|_| IrError::InvalidHex {
        field,
        value: value.to_string(),
    })
}

fn required<T>(value: Option<T>, instruction: &str, field: &'static str) -> IrResult<T> {
    value.ok_or_else(|| IrError::MissingField {
        instruction: instruction.to_string(),
        field,
    })
}

impl TryFrom<WireInstruction> for Instruction {
    type Error = IrError;

    fn try_from(wire: WireInstruction) -> IrResult<Self> {
        let name = wire.name.to_lowercase();
        let kind = match name.as_str() {
            "measure" => InstructionKind::Measure,
            "barrier" => InstructionKind::Barrier,
            "bfunc" => {
                let register = required(wire.register, &name, "register")?;
                let mask = parse_hex("mask", &required(wire.mask, &name, "mask")?)?;
                let relation = Relation::from_symbol(&required(wire.relation, &name, "relation")?);
                let value = parse_hex("val", &required(wire.val, &name, "val")?)?;
                InstructionKind::BinaryFunction(BinaryFunction::new(
                    register, mask, relation, value,
                ))
            }
            _ => match StandardGate::from_name(&name, &wire.params)? {
                Some(gate) => InstructionKind::Gate(gate),
                None => InstructionKind::Unsupported(name),
            },
        };

        Ok(Instruction {
            kind,
            qubits: wire.qubits.into_iter().map(QubitId).collect(),
            memory: wire.memory.into_iter().map(ClbitId).collect(),
            conditional: wire.conditional,
        })
    }
}

impl From<Instruction> for WireInstruction {
    fn from(inst: Instruction) -> Self {
        let mut wire = WireInstruction {
            name: inst.name().to_string(),
            qubits: inst.qubits.iter().map(|q| q.0).collect(),
            memory: inst.memory.iter().map(|c| c.0).collect(),
            conditional: inst.conditional,
            ..WireInstruction::default()
        };
        match inst.kind {
            InstructionKind::Gate(gate) => wire.params = gate.parameters(),
            InstructionKind::BinaryFunction(bfunc) => {
                wire.register = Some(bfunc.register);
                wire.mask = Some(format!("{:#X}", bfunc.mask));
                wire.relation = Some(bfunc.relation.symbol().to_string());
                wire.val = Some(format!("{:#X}", bfunc.value));
            }
            InstructionKind::Measure
            | InstructionKind::Barrier
            | InstructionKind::Unsupported(_) => {}
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(json: &str) -> WireInstruction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("mask", "0xF").unwrap(), 15);
        assert_eq!(parse_hex("mask", "0X1ff").unwrap(), 511);
        assert_eq!(parse_hex("val", "e").unwrap(), 14);
        assert!(matches!(
            parse_hex("val", "0xZZ"),
            Err(IrError::InvalidHex { field: "val", .. })
        ));
    }

    #[test]
    fn test_gate_from_wire() {
        let inst = Instruction::try_from(wire(r#"{"name": "CX", "qubits": [0, 1]}"#)).unwrap();
        assert_eq!(inst.kind, InstructionKind::Gate(StandardGate::CX));
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_bfunc_from_wire() {
        let inst = Instruction::try_from(wire(
            r#"{"name": "bfunc", "register": 2, "mask": "0xFF", "relation": "==", "val": "0xE"}"#,
        ))
        .unwrap();
        assert_eq!(
            inst.kind,
            InstructionKind::BinaryFunction(BinaryFunction::equal(2, 0xFF, 0xE))
        );
    }

    #[test]
    fn test_bfunc_keeps_unknown_relation() {
        let inst = Instruction::try_from(wire(
            r#"{"name": "bfunc", "register": 3, "mask": "0x3", "relation": "=~", "val": "0x1"}"#,
        ))
        .unwrap();
        assert_eq!(
            inst.kind,
            InstructionKind::BinaryFunction(BinaryFunction::new(
                3,
                0x3,
                Relation::Other("=~".into()),
                0x1
            ))
        );
    }

    #[test]
    fn test_bfunc_missing_mask() {
        let err = Instruction::try_from(wire(
            r#"{"name": "bfunc", "register": 2, "relation": "==", "val": "0xE"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, IrError::MissingField { field: "mask", .. }));
    }

    #[test]
    fn test_unknown_gate_is_kept() {
        let inst =
            Instruction::try_from(wire(r#"{"name": "bla", "qubits": [1], "params": [0.5]}"#))
                .unwrap();
        assert_eq!(inst.kind, InstructionKind::Unsupported("bla".into()));
    }

    #[test]
    fn test_wire_roundtrip_bfunc() {
        let inst = Instruction::binary_function(BinaryFunction::equal(4, 0x1FF, 0xB));
        let wire = WireInstruction::from(inst.clone());
        assert_eq!(wire.mask.as_deref(), Some("0x1FF"));
        assert_eq!(wire.val.as_deref(), Some("0xB"));
        assert_eq!(Instruction::try_from(wire).unwrap(), inst);
    }
}
