//! Error types for the cQASM emitter.

use thiserror::Error;

/// Errors that can occur while translating an instruction stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// Gate has no cQASM mapping.
    #[error("Gate {0} not supported")]
    UnsupportedGate(String),

    /// Gate has no conditional cQASM mapping.
    #[error("Conditional gate c-{0} not supported")]
    UnsupportedConditionalGate(String),

    /// The binary function uses a relation cQASM cannot express.
    #[error("Conditional statement with relation {0} not supported")]
    UnsupportedRelation(String),

    /// The binary function selects no classical bits.
    #[error("Conditional statement {0} without a mask")]
    MissingMask(String),

    /// No binary function was declared for the referenced register slot.
    #[error("Conditional not found: reg_idx = {0}")]
    ConditionalNotFound(u32),

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        /// Name of the gate.
        gate: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits.
        got: usize,
    },
}

/// Result type for emitter operations.
pub type EmitResult<T> = Result<T, EmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_gate_display() {
        assert_eq!(
            EmitError::UnsupportedGate("bla".into()).to_string(),
            "Gate bla not supported"
        );
    }

    #[test]
    fn test_conditional_display() {
        assert_eq!(
            EmitError::UnsupportedConditionalGate("bla".into()).to_string(),
            "Conditional gate c-bla not supported"
        );
        assert_eq!(
            EmitError::ConditionalNotFound(2).to_string(),
            "Conditional not found: reg_idx = 2"
        );
        assert_eq!(
            EmitError::MissingMask("rx".into()).to_string(),
            "Conditional statement rx without a mask"
        );
        assert_eq!(
            EmitError::UnsupportedRelation("!=".into()).to_string(),
            "Conditional statement with relation != not supported"
        );
    }
}
