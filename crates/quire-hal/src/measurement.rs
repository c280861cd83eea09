//! Qubit-to-classical-bit measurement maps.
//!
//! The simulator always returns the complete quantum register (full-state
//! projection). A [`MeasurementMap`] records which qubit each classical bit
//! was measured from, so register values can be turned into the classical
//! states the user asked for.

use quire_ir::Experiment;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Classical states are handled as 64-bit integers.
pub const MAX_CLASSICAL_BITS: u32 = u64::BITS;

/// Measured `(qubit, classical bit)` pairs plus the classical register width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementMap {
    /// `(qubit, classical bit)` in instruction order.
    pub measurements: Vec<(u32, u32)>,
    /// Width of the classical register.
    pub number_of_clbits: u32,
}

impl MeasurementMap {
    /// Create a map from explicit pairs.
    pub fn new(measurements: Vec<(u32, u32)>, number_of_clbits: u32) -> Self {
        Self {
            measurements,
            number_of_clbits,
        }
    }

    /// Map qubit `i` to classical bit `i` for every qubit that has a bit.
    pub fn identity(number_of_qubits: u32, number_of_clbits: u32) -> Self {
        let width = number_of_qubits.min(number_of_clbits);
        Self::new((0..width).map(|i| (i, i)).collect(), number_of_clbits)
    }

    /// Collect the measurements of an experiment.
    ///
    /// An experiment without `measure` instructions reads out the whole
    /// register through the identity map.
    pub fn from_experiment(experiment: &Experiment) -> Self {
        let measurements: Vec<(u32, u32)> = experiment
            .measurements()
            .flat_map(|m| m.qubits.iter().zip(&m.memory).map(|(q, c)| (q.0, c.0)))
            .collect();

        if measurements.is_empty() {
            Self::identity(experiment.num_qubits(), experiment.num_clbits())
        } else {
            Self::new(measurements, experiment.num_clbits())
        }
    }

    /// Check that every pair addresses a representable bit.
    pub fn validate(&self) -> HalResult<()> {
        if self.number_of_clbits > MAX_CLASSICAL_BITS {
            return Err(HalError::InvalidMeasurement(format!(
                "{} classical bits exceed the supported {MAX_CLASSICAL_BITS}",
                self.number_of_clbits
            )));
        }
        for &(qubit, clbit) in &self.measurements {
            if qubit >= MAX_CLASSICAL_BITS {
                return Err(HalError::InvalidMeasurement(format!(
                    "qubit {qubit} is outside the register"
                )));
            }
            if clbit >= self.number_of_clbits {
                return Err(HalError::InvalidMeasurement(format!(
                    "classical bit {clbit} is outside a register of {} bits",
                    self.number_of_clbits
                )));
            }
        }
        Ok(())
    }

    /// Classical state read from a full quantum register value.
    ///
    /// When a classical bit is written more than once the last measurement wins.
    pub fn to_classical(&self, register: u64) -> u64 {
        self.measurements
            .iter()
            .fold(0u64, |state, &(qubit, clbit)| {
                let bit = register.checked_shr(qubit).unwrap_or(0) & 1;
                let mask = 1u64.checked_shl(clbit).unwrap_or(0);
                if bit == 1 { state | mask } else { state & !mask }
            })
    }
}
