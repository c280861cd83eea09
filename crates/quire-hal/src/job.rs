//! Job lifecycle types.
//!
//! A submitted job is a provider project holding one provider job per
//! experiment:
//!
//! ```text
//!   run() ──→ Queued ──→ Running ──→ Completed
//!               │           │
//!               └───────────┴──→ Cancelled
//! ```

use chrono::{DateTime, Utc};
use quire_ir::Experiment;
use serde::{Deserialize, Serialize};

use crate::api::ProviderJobStatus;

/// Unique identifier for a job (the provider project id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is waiting in queue.
    Queued,
    /// Job is currently running.
    Running,
    /// Every experiment completed.
    Completed,
    /// Job was cancelled.
    Cancelled,
}

impl JobStatus {
    /// Combine the states of the provider jobs of one project.
    ///
    /// Any cancelled job cancels the whole job; it completes once every
    /// experiment has completed. A project without jobs is still queued.
    pub fn aggregate(states: impl IntoIterator<Item = ProviderJobStatus>) -> Self {
        let mut any = false;
        let mut all_complete = true;
        let mut any_running = false;
        for state in states {
            any = true;
            match state {
                ProviderJobStatus::Cancelled => return JobStatus::Cancelled,
                ProviderJobStatus::Complete => {}
                ProviderJobStatus::Running => {
                    any_running = true;
                    all_complete = false;
                }
                ProviderJobStatus::New => all_complete = false,
            }
        }
        match (any, all_complete, any_running) {
            (true, true, _) => JobStatus::Completed,
            (_, _, true) => JobStatus::Running,
            _ => JobStatus::Queued,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }

    /// Check if the job is still pending (queued or running).
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Running)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A job submitted to a Quantum Inspire backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QiJob {
    /// The job identifier.
    pub id: JobId,
    /// Backend the job was submitted to.
    pub backend: String,
    /// Last known status.
    pub status: JobStatus,
    /// Number of shots requested.
    pub shots: u32,
    /// Time the job was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Experiments submitted with this job; empty for retrieved jobs.
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl QiJob {
    /// Create a new job.
    pub fn new(id: impl Into<JobId>, backend: impl Into<String>, shots: u32) -> Self {
        Self {
            id: id.into(),
            backend: backend.into(),
            status: JobStatus::Queued,
            shots,
            created_at: Some(Utc::now()),
            experiments: vec![],
        }
    }

    /// Attach the submitted experiments.
    #[must_use]
    pub fn with_experiments(mut self, experiments: Vec<Experiment>) -> Self {
        self.experiments = experiments;
        self
    }

    /// Update the status.
    #[must_use]
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// The job identifier.
    pub fn job_id(&self) -> &JobId {
        &self.id
    }
}
