//! Gate types understood by the cQASM translator.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Standard gates with known semantics.
///
/// Parameters are concrete angles in radians. `U`, `U3`, `U2` and `U1` are
/// the generic single-qubit unitaries and are decomposed by the emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),
    /// Alias of [`StandardGate::U`] in the older gate set.
    U3(f64, f64, f64),
    /// U2(φ, λ) = U(π/2, φ, λ).
    U2(f64, f64),
    /// U1(λ) = U(0, 0, λ).
    U1(f64),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Build a gate from its wire name and parameter list.
    ///
    /// Returns `Ok(None)` when the name is not a standard gate so callers can
    /// keep it as an unsupported operation.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Option<Self>> {
        let expected = match name {
            "id" | "x" | "y" | "z" | "h" | "s" | "sdg" | "t" | "tdg" | "cx" | "cz" | "swap"
            | "ccx" => 0,
            "rx" | "ry" | "rz" | "u1" => 1,
            "u2" => 2,
            "u" | "u3" => 3,
            _ => return Ok(None),
        };
        if params.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                gate_name: name.to_string(),
                expected,
                got: params.len(),
            });
        }

        let gate = match name {
            "id" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "rx" => StandardGate::Rx(params[0]),
            "ry" => StandardGate::Ry(params[0]),
            "rz" => StandardGate::Rz(params[0]),
            "u" => StandardGate::U(params[0], params[1], params[2]),
            "u3" => StandardGate::U3(params[0], params[1], params[2]),
            "u2" => StandardGate::U2(params[0], params[1]),
            "u1" => StandardGate::U1(params[0]),
            "cx" => StandardGate::CX,
            "cz" => StandardGate::CZ,
            "swap" => StandardGate::Swap,
            _ => StandardGate::CCX,
        };
        Ok(Some(gate))
    }

    /// Get the wire name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::U(_, _, _) => "u",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U1(_) => "u1",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            StandardGate::CCX => 3,
            _ => 1,
        }
    }

    /// Get the parameters of this gate in wire order.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::U1(p) => vec![p],
            StandardGate::U2(phi, lambda) => vec![phi, lambda],
            StandardGate::U(theta, phi, lambda) | StandardGate::U3(theta, phi, lambda) => {
                vec![theta, phi, lambda]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known() {
        let gate = StandardGate::from_name("u2", &[0.5, 0.25]).unwrap();
        assert_eq!(gate, Some(StandardGate::U2(0.5, 0.25)));
        assert_eq!(StandardGate::from_name("ccx", &[]).unwrap(), Some(StandardGate::CCX));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(StandardGate::from_name("bla", &[1.0]).unwrap(), None);
    }

    #[test]
    fn test_from_name_wrong_parameter_count() {
        let err = StandardGate::from_name("rx", &[]).unwrap_err();
        assert!(matches!(
            err,
            IrError::ParameterCountMismatch {
                expected: 1,
                got: 0,
                ..
            }
        ));
        assert!(err.to_string().contains("rx"));
    }

    #[test]
    fn test_name_roundtrip() {
        for name in [
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "cx", "cz", "swap", "ccx",
        ] {
            let gate = StandardGate::from_name(name, &[]).unwrap().unwrap();
            assert_eq!(gate.name(), name);
        }
    }

    #[test]
    fn test_num_qubits() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::U(0.0, 0.0, 0.0).num_qubits(), 1);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(StandardGate::U3(1.0, 2.0, 3.0).parameters(), vec![1.0, 2.0, 3.0]);
        assert!(StandardGate::CX.parameters().is_empty());
    }
}
