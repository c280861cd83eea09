//! Error types for the HAL crate.

use quire_cqasm::EmitError;
use quire_ir::IrError;
use thiserror::Error;

/// Errors that can occur in backend operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Shot count outside `1..=max_shots`.
    #[error("Invalid shots (number_of_shots={0})")]
    InvalidShots(u32),

    /// Experiment declares no classical bits.
    #[error("Invalid amount of classical bits ({0})!")]
    InvalidClbits(u32),

    /// A qubit is used again after it was measured.
    #[error("Operation after measurement!")]
    OperationAfterMeasurement,

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Job not found.
    #[error("Could not retrieve job with job_id '{0}'")]
    JobNotFound(String),

    /// Backend type not offered by the provider.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// A result record without histogram; carries the provider's raw text.
    #[error("Result from backend contains no histogram data!\n{0}")]
    MissingHistogram(String),

    /// Measurement map refers to a bit outside the register.
    #[error("Invalid measurement map: {0}")]
    InvalidMeasurement(String),

    /// cQASM translation failed.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Instruction stream could not be read.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error reported by the provider API.
    #[error("API error: {0}")]
    Api(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            HalError::InvalidShots(0).to_string(),
            "Invalid shots (number_of_shots=0)"
        );
        assert_eq!(
            HalError::InvalidClbits(0).to_string(),
            "Invalid amount of classical bits (0)!"
        );
        assert_eq!(
            HalError::OperationAfterMeasurement.to_string(),
            "Operation after measurement!"
        );
    }

    #[test]
    fn test_emit_error_is_transparent() {
        let err: HalError = EmitError::UnsupportedGate("bla".into()).into();
        assert_eq!(err.to_string(), "Gate bla not supported");
    }

    #[test]
    fn test_missing_histogram_carries_raw_text() {
        let err = HalError::MissingHistogram("backend crashed".into());
        assert_eq!(
            err.to_string(),
            "Result from backend contains no histogram data!\nbackend crashed"
        );
    }
}
