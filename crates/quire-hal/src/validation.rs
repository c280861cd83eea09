//! Pre-submission checks on a job envelope.

use quire_ir::{Experiment, Qobj};
use rustc_hash::FxHashSet;

use crate::config::BackendConfiguration;
use crate::error::{HalError, HalResult};

/// Validate a job against a backend configuration.
///
/// Checks the shot count once, then every experiment in order.
pub fn validate_qobj(qobj: &Qobj, config: &BackendConfiguration) -> HalResult<()> {
    validate_shots(qobj.config.shots, config)?;
    for experiment in &qobj.experiments {
        validate_experiment(experiment, config)?;
    }
    Ok(())
}

/// Validate a single experiment.
pub fn validate_experiment(experiment: &Experiment, config: &BackendConfiguration) -> HalResult<()> {
    validate_qubits(experiment, config)?;
    validate_clbits(experiment)?;
    validate_no_gates_after_measure(experiment)
}

/// Shots must lie in `1..=max_shots`.
pub fn validate_shots(shots: u32, config: &BackendConfiguration) -> HalResult<()> {
    if shots < 1 || shots > config.max_shots {
        return Err(HalError::InvalidShots(shots));
    }
    Ok(())
}

fn validate_qubits(experiment: &Experiment, config: &BackendConfiguration) -> HalResult<()> {
    if experiment.num_qubits() > config.n_qubits {
        return Err(HalError::CircuitTooLarge(format!(
            "experiment '{}' uses {} qubits, backend '{}' supports {}",
            experiment.header.name,
            experiment.num_qubits(),
            config.backend_name,
            config.n_qubits
        )));
    }
    Ok(())
}

fn validate_clbits(experiment: &Experiment) -> HalResult<()> {
    let clbits = experiment.num_clbits();
    if clbits < 1 {
        return Err(HalError::InvalidClbits(clbits));
    }
    Ok(())
}

/// No instruction other than `measure` may touch a measured qubit.
fn validate_no_gates_after_measure(experiment: &Experiment) -> HalResult<()> {
    let mut measured = FxHashSet::default();
    for instruction in &experiment.instructions {
        for qubit in &instruction.qubits {
            if instruction.is_measure() {
                measured.insert(*qubit);
            } else if measured.contains(qubit) {
                return Err(HalError::OperationAfterMeasurement);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_ir::{ClbitId, ExperimentHeader, Instruction, QobjConfig, QubitId, StandardGate};

    fn qobj(shots: u32, experiment: Experiment) -> Qobj {
        Qobj {
            qobj_id: "test".into(),
            config: QobjConfig {
                shots,
                memory: false,
            },
            experiments: vec![experiment],
        }
    }

    fn bell(memory_slots: u32) -> Experiment {
        Experiment::new(
            ExperimentHeader::new("bell", 2, memory_slots),
            vec![
                Instruction::gate(StandardGate::H, [QubitId(0)]),
                Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(1)]),
                Instruction::measure(QubitId(0), ClbitId(0)),
                Instruction::measure(QubitId(1), ClbitId(1)),
            ],
        )
    }

    #[test]
    fn test_valid_job() {
        let config = BackendConfiguration::default();
        assert!(validate_qobj(&qobj(1024, bell(2)), &config).is_ok());
    }

    #[test]
    fn test_invalid_shots() {
        let config = BackendConfiguration::default();
        let err = validate_qobj(&qobj(0, bell(2)), &config).unwrap_err();
        assert_eq!(err.to_string(), "Invalid shots (number_of_shots=0)");

        let err = validate_qobj(&qobj(1025, bell(2)), &config).unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(1025)));
    }

    #[test]
    fn test_invalid_clbits() {
        let config = BackendConfiguration::default();
        let err = validate_qobj(&qobj(10, bell(0)), &config).unwrap_err();
        assert_eq!(err.to_string(), "Invalid amount of classical bits (0)!");
    }

    #[test]
    fn test_operation_after_measurement() {
        let mut experiment = bell(2);
        experiment
            .instructions
            .push(Instruction::gate(StandardGate::X, [QubitId(1)]));
        let err = validate_experiment(&experiment, &BackendConfiguration::default()).unwrap_err();
        assert!(matches!(err, HalError::OperationAfterMeasurement));
    }

    #[test]
    fn test_measure_twice_is_allowed() {
        let mut experiment = bell(2);
        experiment
            .instructions
            .push(Instruction::measure(QubitId(1), ClbitId(0)));
        assert!(validate_experiment(&experiment, &BackendConfiguration::default()).is_ok());
    }

    #[test]
    fn test_circuit_too_large() {
        let config = BackendConfiguration::default().with_n_qubits(1);
        let err = validate_experiment(&bell(2), &config).unwrap_err();
        assert!(matches!(err, HalError::CircuitTooLarge(_)));
    }
}
