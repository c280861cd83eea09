//! Quantum Inspire provider API.
//!
//! [`QuantumInspireApi`] is the seam between the backend and the provider:
//! an implementation talks to the REST service, tests use an in-memory one.
//! The record types mirror the provider's JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HalResult;
use crate::result::RawResult;

/// A backend type offered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendType {
    /// Provider identifier.
    pub id: u64,
    /// Backend type name.
    pub name: String,
    /// Largest register the backend type supports.
    #[serde(default)]
    pub number_of_qubits: u32,
    /// Whether the backend type is publicly available.
    #[serde(default)]
    pub is_allowed: bool,
}

/// A project grouping the provider jobs of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Provider identifier.
    pub id: u64,
    /// Project name.
    pub name: String,
    /// Shots used when a job does not specify them.
    #[serde(default)]
    pub default_number_of_shots: u32,
    /// Backend type the project runs on.
    #[serde(default)]
    pub backend_type: Option<String>,
}

/// Execution state of a provider job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderJobStatus {
    /// Accepted, not started.
    New,
    /// Executing.
    Running,
    /// Finished with a result.
    Complete,
    /// Cancelled before completion.
    Cancelled,
}

/// One experiment execution inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderJob {
    /// Provider identifier.
    pub id: u64,
    /// Job name (the experiment name).
    pub name: String,
    /// Execution state.
    pub status: ProviderJobStatus,
    /// Requested shots.
    pub number_of_shots: u32,
    /// JSON text submitted with the job.
    #[serde(default)]
    pub user_data: String,
    /// Reference to the result record.
    pub results: String,
}

/// Request to execute a cQASM program asynchronously.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteRequest<'a> {
    /// cQASM program text.
    pub qasm: &'a str,
    /// Target backend type.
    pub backend_type: &'a BackendType,
    /// Shots to run.
    pub number_of_shots: u32,
    /// Project to add the job to.
    pub project: &'a Project,
    /// Job name.
    pub job_name: &'a str,
    /// JSON user data returned with the job.
    pub user_data: String,
}

/// Operations the backend needs from the provider.
#[async_trait]
pub trait QuantumInspireApi: Send + Sync {
    /// Look up a backend type by name.
    async fn get_backend_type_by_name(&self, name: &str) -> HalResult<BackendType>;

    /// List the available backend types.
    async fn list_backend_types(&self) -> HalResult<Vec<BackendType>>;

    /// Create a project for one submission.
    async fn create_project(
        &self,
        name: &str,
        default_number_of_shots: u32,
        backend_type: &BackendType,
    ) -> HalResult<Project>;

    /// Queue a cQASM program; returns the provider job.
    async fn execute_qasm_async(&self, request: ExecuteRequest<'_>) -> HalResult<ProviderJob>;

    /// Look up a project.
    async fn get_project(&self, project_id: &str) -> HalResult<Project>;

    /// List the jobs of a project in submission order.
    async fn get_jobs_from_project(&self, project_id: &str) -> HalResult<Vec<ProviderJob>>;

    /// Fetch the result record a job refers to.
    async fn get_result(&self, results: &str) -> HalResult<RawResult>;

    /// Fetch the per-shot register values of a result; empty when the
    /// backend kept none.
    async fn get_raw_data(&self, result_id: u64) -> HalResult<Vec<u64>>;
}
