//! Error types for the HAL crate.

use std::time::Duration;

use thiserror::Error;

/// Why a backend could not produce a result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No usable credentials, or the provider refused them.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Backend offline, in maintenance, or no device fits the request.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// The backend will not run this circuit: too wide, an unknown gate, or
    /// a shot count outside its limits.
    #[error("Circuit rejected: {0}")]
    Rejected(String),

    /// The backend has no record of the job.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The job ended without a result.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled before it finished.
    #[error("Job cancelled")]
    JobCancelled,

    /// The job was still pending when the wait ran out.
    #[error("No result for job {job} after {waited:?}")]
    Timeout {
        /// Job that was being waited on.
        job: String,
        /// How long the caller waited.
        waited: Duration,
    },

    /// Transport failure talking to a remote backend.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response that could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid backend configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any other provider-side error.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
