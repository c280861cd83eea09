//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while reading an instruction stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A hex-encoded integer field could not be parsed.
    #[error("Invalid hex value '{value}' for field '{field}'")]
    InvalidHex {
        /// Name of the wire field.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A required wire field was absent.
    #[error("Instruction '{instruction}' is missing field '{field}'")]
    MissingField {
        /// Name of the instruction.
        instruction: String,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Gate requires a different number of parameters.
    #[error("Gate '{gate_name}' requires {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },

    /// JSON decoding error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
