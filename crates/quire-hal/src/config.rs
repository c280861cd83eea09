//! Backend configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Name of the default Quantum Inspire backend type.
pub const DEFAULT_BACKEND_NAME: &str = "qi_simulator";

/// Static description of a Quantum Inspire backend.
///
/// Every field has a default, so a JSON file only needs to list the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfiguration {
    /// Backend type name as known to the provider.
    pub backend_name: String,
    /// Version of this binding.
    pub backend_version: String,
    /// Largest register the backend simulates.
    pub n_qubits: u32,
    /// Gates the circuit compiler should target.
    pub basis_gates: Vec<String>,
    /// Whether the backend accepts classically conditioned gates.
    pub conditional: bool,
    /// Whether the backend is a simulator.
    pub simulator: bool,
    /// Whether the backend runs locally.
    pub local: bool,
    /// Whether per-shot memory is available.
    pub memory: bool,
    /// Largest accepted shot count.
    pub max_shots: u32,
}

impl Default for BackendConfiguration {
    fn default() -> Self {
        Self {
            backend_name: DEFAULT_BACKEND_NAME.to_string(),
            backend_version: env!("CARGO_PKG_VERSION").to_string(),
            n_qubits: 26,
            basis_gates: [
                "x", "y", "z", "h", "rx", "ry", "rz", "s", "cx", "ccx", "u1", "u2", "u3", "id",
                "snapshot",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            conditional: false,
            simulator: true,
            local: false,
            memory: true,
            max_shots: 1024,
        }
    }
}

impl BackendConfiguration {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> HalResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| HalError::Configuration(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Set the backend name.
    #[must_use]
    pub fn with_backend_name(mut self, name: impl Into<String>) -> Self {
        self.backend_name = name.into();
        self
    }

    /// Set the maximum number of qubits.
    #[must_use]
    pub fn with_n_qubits(mut self, n_qubits: u32) -> Self {
        self.n_qubits = n_qubits;
        self
    }

    /// Set the maximum number of shots.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Check whether a gate is in the basis set.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.basis_gates.iter().any(|g| g == name)
    }
}
