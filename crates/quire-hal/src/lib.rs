//! Quire Quantum Inspire Backend Binding
//!
//! This crate runs Qobj jobs on the Quantum Inspire platform and turns what
//! the simulator returns into classical outcomes.
//!
//! # Overview
//!
//! - [`QuantumInspireBackend`] validates a job, translates every experiment
//!   to cQASM and queues it through a [`QuantumInspireApi`] implementation
//! - [`MeasurementMap`] records which qubit each classical bit reads
//! - [`convert_histogram`] and [`convert_result_data`] remap the full-register
//!   histogram the simulator reports onto those classical bits
//! - [`BackendConfiguration`] holds the backend's limits and basis gates
//!
//! # Example: Remapping a Result
//!
//! ```rust
//! use quire_hal::{MeasurementMap, RawResult, convert_histogram};
//!
//! // qubit 0 was measured into classical bit 1, qubit 1 into bit 0
//! let map = MeasurementMap::new(vec![(0, 1), (1, 0)], 2);
//! let result = RawResult::from_json(
//!     r#"{"id": 1, "histogram": {"1": 0.6, "2": 0.4}, "number_of_qubits": 2}"#,
//! ).unwrap();
//!
//! let probabilities = convert_histogram(&result, &map).unwrap();
//! assert_eq!(probabilities.get(0b10), Some(&0.6));
//! assert_eq!(probabilities.get(0b01), Some(&0.4));
//! ```
//!
//! # Example: Running a Job
//!
//! ```ignore
//! use std::sync::Arc;
//! use quire_hal::{BackendConfiguration, QuantumInspireBackend};
//! use quire_ir::Qobj;
//!
//! let api = Arc::new(MyApiClient::new(token));
//! let backend = QuantumInspireBackend::new(api, BackendConfiguration::default()).await?;
//!
//! let job = backend.run(&Qobj::from_json(&json)?).await?;
//! while backend.job_status(&job).await?.is_pending() {
//!     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//! }
//! for result in backend.get_experiment_results(&job).await? {
//!     println!("{}: {:?}", result.name, result.data.counts);
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod histogram;
pub mod job;
pub mod measurement;
pub mod result;
pub mod validation;

pub use api::{
    BackendType, ExecuteRequest, Project, ProviderJob, ProviderJobStatus, QuantumInspireApi,
};
pub use backend::{MAX_CACHED_JOBS, PROJECT_PREFIX, QuantumInspireBackend};
pub use config::{BackendConfiguration, DEFAULT_BACKEND_NAME};
pub use error::{HalError, HalResult};
pub use histogram::{Counts, Histogram, Probabilities, to_hex};
pub use job::{JobId, JobStatus, QiJob};
pub use measurement::MeasurementMap;
pub use result::{
    ExperimentResult, ExperimentResultData, RESULT_SEED, RawHistogram, RawResult, ResultHeader,
    UserData, convert_histogram, convert_result_data,
};
pub use validation::{validate_experiment, validate_qobj, validate_shots};
