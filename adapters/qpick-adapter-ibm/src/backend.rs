//! IBM Quantum backend implementation.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use async_trait::async_trait;
use qpick_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, JobId, JobStatus, ValidationResult, env_secret,
};
use qpick_ir::Circuit;
use qpick_ir::qasm::emit;
use tracing::{debug, info, warn};

use crate::api::{BackendInfo, IbmClient, JobResultResponse, LEGACY_ENDPOINT, pick_least_busy};
use crate::credentials::{IbmCredentials, LEGACY_TOKEN_VAR};
use crate::error::{IbmError, IbmResult};

/// Device used when none is named.
pub const DEFAULT_BACKEND: &str = "ibm_torino";

/// Provider transpilation level used unless overridden.
pub const DEFAULT_OPTIMIZATION_LEVEL: u8 = 1;

/// How long to cache backend info before refreshing from the API.
const BACKEND_INFO_TTL: Duration = Duration::from_secs(5 * 60);

/// Qubit count assumed before device details have been fetched.
const ASSUMED_QUBITS: u32 = 127;

/// IBM Quantum backend adapter.
pub struct IbmBackend {
    client: Arc<IbmClient>,
    target: String,
    capabilities: Capabilities,
    backend_info: Arc<RwLock<Option<(BackendInfo, Instant)>>>,
    optimization_level: u8,
    /// Classical register width per in-flight job, for padding samples.
    /// Entries are dropped once the job's result is decoded or it is cancelled.
    register_widths: Mutex<FxHashMap<String, usize>>,
}

impl IbmBackend {
    fn from_parts(client: IbmClient, target: String, info: Option<BackendInfo>) -> Self {
        let num_qubits = info
            .as_ref()
            .map_or(ASSUMED_QUBITS, |i| u32::try_from(i.num_qubits).unwrap_or(u32::MAX));
        let mut capabilities = Capabilities::ibm(&target, num_qubits);
        if let Some(max_shots) = info.as_ref().and_then(|i| i.max_shots) {
            capabilities.max_shots = max_shots;
        }

        Self {
            client: Arc::new(client),
            capabilities,
            target,
            backend_info: Arc::new(RwLock::new(info.map(|i| (i, Instant::now())))),
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
            register_widths: Mutex::new(FxHashMap::default()),
        }
    }

    /// Connect to a named device with credentials from the environment.
    pub async fn connect(target: impl Into<String>) -> IbmResult<Self> {
        let client = IbmClient::from_credentials(&IbmCredentials::from_env()?).await?;
        Self::with_client(client, target).await
    }

    /// Connect to the least busy operational device with at least
    /// `min_qubits` qubits, with credentials from the environment.
    pub async fn connect_least_busy(min_qubits: usize) -> IbmResult<Self> {
        let client = IbmClient::from_credentials(&IbmCredentials::from_env()?).await?;
        Self::least_busy(client, min_qubits).await
    }

    /// Target `target` through an existing client.
    pub async fn with_client(client: IbmClient, target: impl Into<String>) -> IbmResult<Self> {
        let target = target.into();
        let info = client.get_backend(&target).await?;
        info!(
            "IBM backend {} ({} qubits, operational: {})",
            info.name, info.num_qubits, info.status.operational
        );
        Ok(Self::from_parts(client, target, Some(info)))
    }

    /// Pick the least busy eligible device visible to `client`.
    pub async fn least_busy(client: IbmClient, min_qubits: usize) -> IbmResult<Self> {
        let backends = client.list_backends().await?;
        let info = pick_least_busy(&backends, min_qubits)
            .cloned()
            .ok_or(IbmError::NoEligibleBackend { min_qubits })?;
        info!(
            "least busy IBM backend: {} ({} pending jobs)",
            info.name,
            info.status
                .pending_jobs
                .map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );
        Ok(Self::from_parts(client, info.name.clone(), Some(info)))
    }

    /// Set the provider transpilation level (0-3).
    pub fn with_optimization_level(mut self, level: u8) -> IbmResult<Self> {
        if level > 3 {
            return Err(IbmError::InvalidParameter(format!(
                "optimization_level must be 0-3, got {level}"
            )));
        }
        self.optimization_level = level;
        Ok(self)
    }

    /// Get the target device name.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Provider transpilation level.
    pub fn optimization_level(&self) -> u8 {
        self.optimization_level
    }

    /// Get backend information, fetching from API if not cached or stale.
    async fn get_backend_info(&self) -> IbmResult<BackendInfo> {
        {
            let cached = self.backend_info.read().await;
            if let Some((ref info, fetched_at)) = *cached {
                if fetched_at.elapsed() < BACKEND_INFO_TTL {
                    return Ok(info.clone());
                }
            }
        }

        let info = self.client.get_backend(&self.target).await?;
        *self.backend_info.write().await = Some((info.clone(), Instant::now()));
        Ok(info)
    }

    /// `OpenQASM` 3 text with the standard gate library included, which
    /// IBM's loader needs to resolve `h`, `x` and friends.
    fn circuit_to_qasm(circuit: &Circuit) -> String {
        emit(circuit).replacen(
            "OPENQASM 3.0;",
            "OPENQASM 3.0;\ninclude \"stdgates.inc\";",
            1,
        )
    }

    fn widths(&self) -> MutexGuard<'_, FxHashMap<String, usize>> {
        self.register_widths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn forget_job(&self, job_id: &JobId) {
        self.widths().remove(&job_id.0);
    }

    /// Decode a finished job's results and drop its bookkeeping.
    fn decode_results(&self, job_id: &JobId, results: &JobResultResponse) -> ExecutionResult {
        let width = self.widths().remove(&job_id.0);
        let counts = results_to_counts(results, width);
        let total_shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);
        ExecutionResult::new(counts, total_shots)
    }
}

/// Convert Sampler results to counts.
///
/// `register_width` is the circuit's classical bit count when known; samples
/// are zero-padded to it. Without it the width is inferred from the largest
/// sample, which loses leading zeros when every shot has them.
fn results_to_counts(results: &JobResultResponse, register_width: Option<usize>) -> Counts {
    let mut counts = Counts::new();
    let Some(result) = results.results.first() else {
        return counts;
    };

    if let Some(data) = &result.data {
        for register in data.values() {
            let width = register_width.unwrap_or_else(|| infer_bit_width(&register.samples));
            for sample in &register.samples {
                counts.insert(hex_to_binary(sample, width), 1);
            }
        }
    } else if let Some(raw_counts) = &result.counts {
        for (outcome, &count) in raw_counts {
            counts.insert(hex_to_binary(outcome, register_width.unwrap_or(0)), count);
        }
    }

    counts
}

/// Bits needed for the largest hex sample (at least one).
fn infer_bit_width(samples: &[String]) -> usize {
    let max_val = samples
        .iter()
        .filter_map(|s| u64::from_str_radix(s.strip_prefix("0x").unwrap_or(s), 16).ok())
        .max()
        .unwrap_or(0);

    if max_val == 0 {
        1
    } else {
        (u64::BITS - max_val.leading_zeros()) as usize
    }
}

/// Render an outcome as a binary string of at least `width` bits.
///
/// `0x`-prefixed values are hex. Unprefixed values made only of `0`/`1` are
/// already binary and are just padded. Anything unparsable is returned
/// unchanged so the caller can reject it. A `width` of 0 means 4 bits per
/// hex digit.
fn hex_to_binary(outcome: &str, width: usize) -> String {
    let (digits, radix) = match outcome.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None if !outcome.is_empty() && outcome.bytes().all(|b| b == b'0' || b == b'1') => {
            (outcome, 2)
        }
        None => (outcome, 16),
    };

    match u64::from_str_radix(digits, radix) {
        Ok(value) => {
            let width = match (width, radix) {
                (0, 16) => digits.len() * 4,
                (0, _) => digits.len(),
                (w, _) => w,
            };
            format!("{value:0width$b}")
        }
        Err(_) => outcome.to_string(),
    }
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.target
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        let info = self.get_backend_info().await?;
        if info.status.operational {
            Ok(BackendAvailability {
                is_available: true,
                queue_depth: info.status.pending_jobs,
                estimated_wait: None,
                status_message: info.status.status_msg,
            })
        } else {
            Ok(BackendAvailability::unavailable(
                info.status
                    .status_msg
                    .unwrap_or_else(|| format!("{} offline", self.target)),
            ))
        }
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::check(&self.capabilities, circuit))
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let info = self.get_backend_info().await?;

        if circuit.num_qubits() > info.num_qubits {
            return Err(IbmError::TooManyQubits {
                required: circuit.num_qubits(),
                available: info.num_qubits,
            }
            .into());
        }
        if !info.status.operational {
            return Err(IbmError::BackendUnavailable(
                info.status
                    .status_msg
                    .unwrap_or_else(|| format!("{} offline", self.target)),
            )
            .into());
        }
        if shots == 0 || info.max_shots.is_some_and(|max| shots > max) {
            return Err(HalError::Rejected(format!(
                "{shots} shots not accepted by {}",
                self.target
            )));
        }

        let qasm = Self::circuit_to_qasm(circuit);
        debug!("submitting to {}:\n{qasm}", self.target);

        let response = self
            .client
            .submit_sampler_job(&self.target, qasm, shots, self.optimization_level)
            .await
            .map_err(|e| match e {
                e if e.is_auth() => HalError::from(e),
                other => HalError::Provider(format!("submission failed: {other}")),
            })?;

        self.widths().insert(response.id.clone(), circuit.num_clbits());

        info!("submitted IBM job {} to {}", response.id, self.target);
        Ok(JobId(response.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let status = self.client.get_job_status(&job_id.0).await?;

        let job_status = match status.status.to_uppercase().as_str() {
            "QUEUED" => JobStatus::Queued,
            "VALIDATING" | "RUNNING" => JobStatus::Running,
            "COMPLETED" => JobStatus::Completed,
            "FAILED" | "ERROR" => JobStatus::Failed(
                status
                    .error_message()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            "CANCELLED" => JobStatus::Cancelled,
            other => {
                warn!("unrecognised IBM job status {other:?}, treating as running");
                JobStatus::Running
            }
        };

        Ok(job_status)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let status = self.client.get_job_status(&job_id.0).await?;

        if !status.is_completed() {
            if status.is_failed() {
                self.forget_job(job_id);
                return Err(HalError::JobFailed(
                    status
                        .error_message()
                        .unwrap_or_else(|| "Job failed".to_string()),
                ));
            }
            if status.is_cancelled() {
                self.forget_job(job_id);
                return Err(HalError::JobCancelled);
            }
            return Err(HalError::Provider(format!(
                "Job {} not yet completed",
                job_id.0
            )));
        }

        let results = self.client.get_job_results(&job_id.0).await?;
        Ok(self.decode_results(job_id, &results))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client.cancel_job(&job_id.0).await?;
        self.forget_job(job_id);
        Ok(())
    }
}

impl BackendFactory for IbmBackend {
    /// Build a legacy-endpoint backend.
    ///
    /// The token comes from `config.token` or, failing that,
    /// `IBM_QUANTUM_TOKEN`. Recognised extras: `backend`, `instance` and
    /// `optimization_level`.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let token = config
            .token
            .clone()
            .or_else(|| env_secret(LEGACY_TOKEN_VAR))
            .ok_or(IbmError::MissingToken)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(LEGACY_ENDPOINT);
        let target = config.extra_str("backend").unwrap_or(DEFAULT_BACKEND);

        let mut client = IbmClient::new(endpoint, &token)?;
        if let Some(instance) = config.extra_str("instance") {
            client = client.with_instance(instance);
        }

        let mut backend = Self::from_parts(client, target.to_string(), None);
        if let Some(level) = config.extra_u64("optimization_level") {
            let level = u8::try_from(level).map_err(|_| {
                HalError::Configuration(format!("optimization_level out of range: {level}"))
            })?;
            backend = backend.with_optimization_level(level)?;
        }
        Ok(backend)
    }
}
