//! Randomness oracles.
//!
//! An oracle turns a requested [`BitWidth`] into one bitstring of that
//! width. [`BackendOracle`] does it by running a uniform superposition
//! circuit on a quantum [`Backend`] for a single shot.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use qpick_hal::backend::{DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
use qpick_hal::{Backend, HalError, ValidationResult};
use qpick_ir::Circuit;
use tracing::{debug, instrument};

use crate::error::{SelectError, SelectResult};
use crate::width::BitWidth;

/// A source of random bitstrings.
///
/// Implementations return the bitstring as received; the selector checks
/// its length and alphabet.
#[async_trait]
pub trait RandomnessOracle: Send + Sync {
    /// Name reported alongside each selection.
    fn name(&self) -> &str;

    /// Draw one bitstring of exactly `width` bits.
    async fn sample_bits(&self, width: BitWidth) -> SelectResult<String>;
}

#[async_trait]
impl<O: RandomnessOracle + ?Sized> RandomnessOracle for Arc<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn sample_bits(&self, width: BitWidth) -> SelectResult<String> {
        (**self).sample_bits(width).await
    }
}

#[async_trait]
impl<O: RandomnessOracle + ?Sized> RandomnessOracle for Box<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn sample_bits(&self, width: BitWidth) -> SelectResult<String> {
        (**self).sample_bits(width).await
    }
}

/// Oracle backed by a quantum [`Backend`].
///
/// Each call builds a `width`-qubit circuit with a Hadamard on every qubit,
/// measures qubit `i` into classical bit `i`, and runs it for one shot.
/// Classical bit `width - 1` is the leftmost character of the result.
pub struct BackendOracle {
    backend: Arc<dyn Backend>,
    poll_interval: Duration,
    timeout: Duration,
}

impl BackendOracle {
    /// Wrap a backend with the default polling schedule.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Give up on a job after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Poll job status every `interval`.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}

impl std::fmt::Debug for BackendOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendOracle")
            .field("backend", &self.backend.name())
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl RandomnessOracle for BackendOracle {
    fn name(&self) -> &str {
        self.backend.name()
    }

    #[instrument(skip(self), fields(backend = %self.backend.name(), bits = width.bits()))]
    async fn sample_bits(&self, width: BitWidth) -> SelectResult<String> {
        let circuit = Circuit::superposition(width.bits())
            .map_err(|e| SelectError::InvalidArgument(e.to_string()))?;

        if let ValidationResult::Invalid { reasons } = self.backend.validate(&circuit).await? {
            return Err(SelectError::OracleUnavailable(HalError::Rejected(
                reasons.join("; "),
            )));
        }

        let availability = self.backend.availability().await?;
        if !availability.is_available {
            let reason = availability
                .status_message
                .unwrap_or_else(|| self.backend.name().to_string());
            return Err(SelectError::OracleUnavailable(HalError::BackendUnavailable(
                reason,
            )));
        }

        let job_id = self.backend.submit(&circuit, 1).await?;
        debug!(job_id = %job_id, "submitted sampling job");

        let result = self
            .backend
            .wait_for(&job_id, self.poll_interval, self.timeout)
            .await?;

        let total = result.counts.total_shots();
        if total != 1 {
            return Err(SelectError::ProtocolError(format!(
                "expected exactly one shot, got {total}"
            )));
        }
        let bits = result.counts.single_outcome().ok_or_else(|| {
            SelectError::ProtocolError(format!(
                "expected one outcome, got {}",
                result.counts.len()
            ))
        })?;

        debug!(job_id = %job_id, sample = bits, "received sample");
        Ok(bits.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpick_hal::{BackendAvailability, Capabilities, Counts, ExecutionResult, HalResult, JobId, JobStatus};
    use std::sync::Mutex;

    /// Backend that replays a fixed script.
    struct ScriptedBackend {
        capabilities: Capabilities,
        available: bool,
        status: JobStatus,
        counts: Counts,
        submitted: Mutex<Vec<(usize, u32)>>,
    }

    impl ScriptedBackend {
        fn returning(counts: Counts) -> Self {
            Self {
                capabilities: Capabilities::simulator(8),
                available: true,
                status: JobStatus::Completed,
                counts,
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn single(bits: &str) -> Self {
            let mut counts = Counts::new();
            counts.insert(bits, 1);
            Self::returning(counts)
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        async fn availability(&self) -> HalResult<BackendAvailability> {
            if self.available {
                Ok(BackendAvailability::always_available())
            } else {
                Ok(BackendAvailability::unavailable("maintenance"))
            }
        }

        async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::check(&self.capabilities, circuit))
        }

        async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
            self.submitted
                .lock()
                .unwrap()
                .push((circuit.num_qubits(), shots));
            Ok(JobId::new("job-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            Ok(self.status.clone())
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let shots = u32::try_from(self.counts.total_shots()).unwrap();
            Ok(ExecutionResult::new(self.counts.clone(), shots))
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    fn width(bits: u32) -> BitWidth {
        BitWidth::new(bits).unwrap()
    }

    #[tokio::test]
    async fn test_single_shot_sample() {
        let backend = Arc::new(ScriptedBackend::single("101"));
        let oracle = BackendOracle::new(backend.clone());

        let bits = oracle.sample_bits(width(3)).await.unwrap();
        assert_eq!(bits, "101");
        assert_eq!(*backend.submitted.lock().unwrap(), vec![(3, 1)]);
        assert_eq!(oracle.name(), "scripted");
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_not_submitted() {
        let mut backend = ScriptedBackend::single("1");
        backend.available = false;
        let backend = Arc::new(backend);
        let oracle = BackendOracle::new(backend.clone());

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SelectError::OracleUnavailable(HalError::BackendUnavailable(ref msg)) if msg == "maintenance"
        ));
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_too_wide_is_unavailable() {
        let backend = Arc::new(ScriptedBackend::single("1"));
        let oracle = BackendOracle::new(backend.clone());

        let err = oracle.sample_bits(width(9)).await.unwrap_err();
        assert!(matches!(
            err,
            SelectError::OracleUnavailable(HalError::Rejected(_))
        ));
        assert!(backend.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_job_is_unavailable() {
        let mut backend = ScriptedBackend::single("1");
        backend.status = JobStatus::Failed("calibration".into());
        let oracle = BackendOracle::new(Arc::new(backend));

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SelectError::OracleUnavailable(HalError::JobFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_job_is_unavailable() {
        let mut backend = ScriptedBackend::single("1");
        backend.status = JobStatus::Cancelled;
        let oracle = BackendOracle::new(Arc::new(backend));

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SelectError::OracleUnavailable(HalError::JobCancelled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_job_times_out() {
        let mut backend = ScriptedBackend::single("1");
        backend.status = JobStatus::Queued;
        let oracle = BackendOracle::new(Arc::new(backend))
            .with_poll_interval(Duration::from_millis(100))
            .with_timeout(Duration::from_secs(1));

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(
            err,
            SelectError::OracleUnavailable(HalError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_multiple_outcomes_is_protocol_error() {
        let mut counts = Counts::new();
        counts.insert("0", 1);
        counts.insert("1", 1);
        let oracle = BackendOracle::new(Arc::new(ScriptedBackend::returning(counts)));

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));
    }

    #[tokio::test]
    async fn test_repeated_outcome_is_protocol_error() {
        let mut counts = Counts::new();
        counts.insert("101", 2);
        let backend = Arc::new(ScriptedBackend::returning(counts));
        let oracle = BackendOracle::new(backend.clone());

        let err = oracle.sample_bits(width(3)).await.unwrap_err();
        match err {
            SelectError::ProtocolError(msg) => assert!(msg.contains("got 2")),
            other => panic!("expected protocol error, got {other:?}"),
        }
        assert_eq!(*backend.submitted.lock().unwrap(), vec![(3, 1)]);
    }

    #[tokio::test]
    async fn test_empty_counts_is_protocol_error() {
        let oracle = BackendOracle::new(Arc::new(ScriptedBackend::returning(Counts::new())));

        let err = oracle.sample_bits(width(1)).await.unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));
    }

    #[tokio::test]
    async fn test_boxed_oracle_delegates() {
        let oracle: Box<dyn RandomnessOracle> =
            Box::new(BackendOracle::new(Arc::new(ScriptedBackend::single("11"))));
        assert_eq!(oracle.name(), "scripted");
        assert_eq!(oracle.sample_bits(width(2)).await.unwrap(), "11");
    }
}
