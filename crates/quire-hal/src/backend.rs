//! Quantum Inspire backend.

use std::sync::Arc;

use quire_cqasm::{EmitterConfig, emit_with_config};
use quire_ir::{Experiment, Qobj};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::api::{BackendType, ExecuteRequest, Project, ProviderJob, QuantumInspireApi};
use crate::config::BackendConfiguration;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus, QiJob};
use crate::result::{ExperimentResult, UserData};
use crate::validation::validate_qobj;

/// Prefix of the project created for every submission.
pub const PROJECT_PREFIX: &str = "qi-sdk-project";

/// Maximum number of cached jobs before evicting finished entries.
pub const MAX_CACHED_JOBS: usize = 10_000;

/// What the backend remembers about a job it submitted.
struct CachedJob {
    experiments: Vec<Experiment>,
    status: JobStatus,
}

/// An experiment translated and ready for submission.
struct PreparedExperiment<'a> {
    experiment: &'a Experiment,
    qasm: String,
    user_data: String,
}

/// Backend executing Qobj jobs on the Quantum Inspire platform.
///
/// Each [`run`](Self::run) creates one provider project and queues one
/// provider job per experiment in it. The project id is the job id.
pub struct QuantumInspireBackend<A: QuantumInspireApi> {
    api: Arc<A>,
    configuration: BackendConfiguration,
    emitter_config: EmitterConfig,
    backend_type: BackendType,
    /// Jobs submitted through this backend, bounded by `cache_capacity`.
    submitted: Arc<Mutex<FxHashMap<JobId, CachedJob>>>,
    cache_capacity: usize,
}

impl<A: QuantumInspireApi> std::fmt::Debug for QuantumInspireBackend<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantumInspireBackend")
            .field("name", &self.configuration.backend_name)
            .field("backend_type", &self.backend_type.id)
            .finish_non_exhaustive()
    }
}

impl<A: QuantumInspireApi> QuantumInspireBackend<A> {
    /// Create a backend, resolving its backend type with the provider.
    #[instrument(skip(api, configuration), fields(backend = %configuration.backend_name))]
    pub async fn new(api: Arc<A>, configuration: BackendConfiguration) -> HalResult<Self> {
        let backend_type = api
            .get_backend_type_by_name(&configuration.backend_name)
            .await?;
        debug!("Resolved backend type {} ({})", backend_type.name, backend_type.id);

        Ok(Self {
            api,
            configuration,
            emitter_config: EmitterConfig::default(),
            backend_type,
            submitted: Arc::new(Mutex::new(FxHashMap::default())),
            cache_capacity: MAX_CACHED_JOBS,
        })
    }

    /// Replace the cQASM emitter settings.
    #[must_use]
    pub fn with_emitter_config(mut self, emitter_config: EmitterConfig) -> Self {
        self.emitter_config = emitter_config;
        self
    }

    /// Limit the number of submitted jobs kept in memory.
    #[must_use]
    pub fn with_job_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }

    /// Backend name.
    pub fn name(&self) -> &str {
        &self.configuration.backend_name
    }

    /// Backend configuration.
    pub fn configuration(&self) -> &BackendConfiguration {
        &self.configuration
    }

    /// Provider backend type.
    pub fn backend_type(&self) -> &BackendType {
        &self.backend_type
    }

    /// Translate an experiment to the cQASM program submitted for it.
    pub fn generate_cqasm(&self, experiment: &Experiment) -> HalResult<String> {
        Ok(emit_with_config(experiment, &self.emitter_config)?)
    }

    /// Validate and submit a job.
    ///
    /// All experiments are translated before anything is sent, so a job that
    /// fails to translate leaves no project behind.
    #[instrument(skip(self, qobj), fields(qobj_id = %qobj.qobj_id))]
    pub async fn run(&self, qobj: &Qobj) -> HalResult<QiJob> {
        validate_qobj(qobj, &self.configuration)?;
        let shots = qobj.config.shots;

        let prepared = qobj
            .experiments
            .iter()
            .map(|experiment| self.prepare(experiment))
            .collect::<HalResult<Vec<_>>>()?;

        let project_name = format!("{PROJECT_PREFIX}-{}", Uuid::new_v4());
        let project = self
            .api
            .create_project(&project_name, shots, &self.backend_type)
            .await?;
        info!(
            "Created project {} ({}) for {} experiments",
            project.name,
            project.id,
            prepared.len()
        );

        for experiment in prepared {
            let provider_job = self.submit(experiment, shots, &project).await?;
            debug!("Queued provider job {} ({})", provider_job.id, provider_job.name);
        }

        let job_id = JobId::new(project.id.to_string());
        self.remember(job_id.clone(), qobj.experiments.clone()).await;

        Ok(QiJob::new(job_id, self.name(), shots).with_experiments(qobj.experiments.clone()))
    }

    /// Cache a submitted job, evicting finished entries if the cache is full.
    /// Without finished entries an arbitrary job is dropped.
    async fn remember(&self, job_id: JobId, experiments: Vec<Experiment>) {
        let mut jobs = self.submitted.lock().await;
        if jobs.len() >= self.cache_capacity {
            jobs.retain(|_, cached| cached.status.is_pending());
            if jobs.len() >= self.cache_capacity {
                warn!(
                    capacity = self.cache_capacity,
                    "Job cache at capacity with no finished entries; evicting an active entry"
                );
                if let Some(key) = jobs.keys().next().cloned() {
                    jobs.remove(&key);
                }
            }
        }
        jobs.insert(
            job_id,
            CachedJob {
                experiments,
                status: JobStatus::Queued,
            },
        );
    }

    fn prepare<'a>(&self, experiment: &'a Experiment) -> HalResult<PreparedExperiment<'a>> {
        let qasm = self.generate_cqasm(experiment)?;
        let user_data = serde_json::to_string(&UserData::for_experiment(experiment))?;
        Ok(PreparedExperiment {
            experiment,
            qasm,
            user_data,
        })
    }

    async fn submit(
        &self,
        prepared: PreparedExperiment<'_>,
        shots: u32,
        project: &Project,
    ) -> HalResult<ProviderJob> {
        self.api
            .execute_qasm_async(ExecuteRequest {
                qasm: &prepared.qasm,
                backend_type: &self.backend_type,
                number_of_shots: shots,
                project,
                job_name: &prepared.experiment.header.name,
                user_data: prepared.user_data,
            })
            .await
    }

    /// Look up a previously submitted job by id.
    ///
    /// Experiments and last known status come from the cache; a job that was
    /// never cached, or has been evicted, comes back queued and without
    /// experiments.
    #[instrument(skip(self))]
    pub async fn retrieve_job(&self, job_id: &str) -> HalResult<QiJob> {
        let project = self.api.get_project(job_id).await.map_err(|e| {
            warn!("Project lookup failed: {}", e);
            HalError::JobNotFound(job_id.to_string())
        })?;

        let id = JobId::new(job_id);
        let (experiments, status) = match self.submitted.lock().await.get(&id) {
            Some(cached) => (cached.experiments.clone(), cached.status.clone()),
            None => (vec![], JobStatus::Queued),
        };

        Ok(QiJob::new(id, self.name(), project.default_number_of_shots)
            .with_experiments(experiments)
            .with_status(status))
    }

    /// Current status of a job, combined over its experiments.
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn job_status(&self, job: &QiJob) -> HalResult<JobStatus> {
        let jobs = self.api.get_jobs_from_project(&job.id.0).await?;
        let status = JobStatus::aggregate(jobs.iter().map(|j| j.status));
        debug!("Job {} is {}", job.id, status);

        if let Some(cached) = self.submitted.lock().await.get_mut(&job.id) {
            cached.status = status.clone();
        }
        Ok(status)
    }

    /// Fetch and convert the results of every experiment of a job.
    pub async fn get_experiment_results(&self, job: &QiJob) -> HalResult<Vec<ExperimentResult>> {
        let mut rng = StdRng::from_entropy();
        self.get_experiment_results_with_rng(job, &mut rng).await
    }

    /// Fetch and convert results, drawing single-shot samples from `rng`.
    #[instrument(skip(self, job, rng), fields(job_id = %job.id))]
    pub async fn get_experiment_results_with_rng<R: Rng + Send>(
        &self,
        job: &QiJob,
        rng: &mut R,
    ) -> HalResult<Vec<ExperimentResult>> {
        let jobs = self.api.get_jobs_from_project(&job.id.0).await?;

        let mut results = Vec::with_capacity(jobs.len());
        for provider_job in jobs {
            let result = self.api.get_result(&provider_job.results).await?;
            result.checked_histogram()?;

            let user_data: UserData = serde_json::from_str(&provider_job.user_data)?;
            let raw_data = self.api.get_raw_data(result.id).await?;
            debug!(
                "Result {} of '{}': {} histogram entries, {} shots of raw data",
                result.id,
                provider_job.name,
                result.histogram.len(),
                raw_data.len()
            );

            results.push(ExperimentResult::from_raw(
                provider_job.name,
                provider_job.number_of_shots,
                &result,
                user_data,
                &raw_data,
                rng,
            )?);
        }

        info!("Converted {} experiment results", results.len());
        Ok(results)
    }
}
